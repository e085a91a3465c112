//! The slots a forecast panel exposes.

use crate::background::Gradient;
use crate::cards::WeekdayCard;
use crate::display::HourlySlot;
use crate::icons::IconAsset;

/// Writable view of the panel.
///
/// Slot icons of `None` mean the tag had no image; implementations keep
/// whatever the slot showed before.
pub trait UiPort {
    fn set_current_temp(&mut self, text: &str);
    fn set_current_icon(&mut self, icon: IconAsset);
    fn set_city_label(&mut self, text: &str);
    fn set_description(&mut self, text: &str);
    fn set_background(&mut self, gradient: Gradient);
    fn set_hourly_slot(&mut self, index: usize, slot: &HourlySlot);
    fn set_weekday_card(&mut self, index: usize, card: &WeekdayCard);

    /// `true` shows the spinner and hides the body, `false` the reverse.
    fn set_loading(&mut self, loading: bool);

    fn clear_search_input(&mut self);

    /// How many weekday cards the panel has room for
    fn weekday_card_count(&self) -> usize;
}
