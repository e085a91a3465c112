//! Plain-text panel for terminals.

use std::fmt;

use crate::background::Gradient;
use crate::cards::WeekdayCard;
use crate::display::{format_temp, HourlySlot};
use crate::icons::IconAsset;
use crate::port::UiPort;
use crate::window::WINDOW_LEN;

/// In-memory panel state, printable with `Display`.
///
/// Starts in the loading state with empty slots.
#[derive(Debug, Clone)]
pub struct TextPanel {
    search_input: String,
    loading: bool,
    current_temp: String,
    current_icon: Option<IconAsset>,
    city_label: String,
    description: String,
    background: Option<Gradient>,
    hourly: [Option<HourlySlot>; WINDOW_LEN],
    cards: Vec<Option<WeekdayCard>>,
}

impl TextPanel {
    pub fn new(weekday_cards: usize) -> Self {
        Self {
            search_input: String::new(),
            loading: true,
            current_temp: String::new(),
            current_icon: None,
            city_label: String::new(),
            description: String::new(),
            background: None,
            hourly: Default::default(),
            cards: vec![None; weekday_cards],
        }
    }

    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_temp(&self) -> &str {
        &self.current_temp
    }

    pub fn current_icon(&self) -> Option<IconAsset> {
        self.current_icon
    }

    pub fn city_label(&self) -> &str {
        &self.city_label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn background(&self) -> Option<Gradient> {
        self.background
    }

    pub fn hourly_slot(&self, index: usize) -> Option<&HourlySlot> {
        self.hourly.get(index).and_then(Option::as_ref)
    }

    pub fn weekday_card(&self, index: usize) -> Option<&WeekdayCard> {
        self.cards.get(index).and_then(Option::as_ref)
    }
}

impl UiPort for TextPanel {
    fn set_current_temp(&mut self, text: &str) {
        self.current_temp = text.to_string();
    }

    fn set_current_icon(&mut self, icon: IconAsset) {
        self.current_icon = Some(icon);
    }

    fn set_city_label(&mut self, text: &str) {
        self.city_label = text.to_string();
    }

    fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    fn set_background(&mut self, gradient: Gradient) {
        self.background = Some(gradient);
    }

    fn set_hourly_slot(&mut self, index: usize, slot: &HourlySlot) {
        let Some(entry) = self.hourly.get_mut(index) else {
            tracing::warn!("Hourly slot {} out of range", index);
            return;
        };
        // Keep the old image when the new tag has none
        let icon = slot
            .icon
            .or_else(|| entry.as_ref().and_then(|old| old.icon));
        *entry = Some(HourlySlot {
            icon,
            ..slot.clone()
        });
    }

    fn set_weekday_card(&mut self, index: usize, card: &WeekdayCard) {
        let Some(entry) = self.cards.get_mut(index) else {
            tracing::warn!("Weekday card {} out of range", index);
            return;
        };
        let icon = card
            .icon
            .or_else(|| entry.as_ref().and_then(|old| old.icon));
        *entry = Some(WeekdayCard {
            icon,
            ..card.clone()
        });
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn clear_search_input(&mut self) {
        self.search_input.clear();
    }

    fn weekday_card_count(&self) -> usize {
        self.cards.len()
    }
}

impl fmt::Display for TextPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            return writeln!(f, "Loading...");
        }

        let icon = |icon: Option<IconAsset>| icon.map_or("-", |i| i.alt);

        writeln!(
            f,
            "{} {} ({})",
            self.current_temp,
            self.city_label,
            icon(self.current_icon)
        )?;
        writeln!(f, "{}", self.description)?;
        if let Some(gradient) = self.background {
            writeln!(f, "background {} {}", gradient.band(), gradient.css())?;
        }

        writeln!(f)?;
        for slot in self.hourly.iter().flatten() {
            writeln!(
                f,
                "  {:>5}  {:>6}  {}",
                slot.label,
                format_temp(slot.temp),
                icon(slot.icon)
            )?;
        }

        writeln!(f)?;
        for card in self.cards.iter().flatten() {
            writeln!(
                f,
                "  {:<9}  {:>4} / {:<4}  {}",
                card.weekday,
                card.min,
                card.max,
                icon(card.icon)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::resolve_tag;

    fn slot(label: &str, icon: Option<IconAsset>) -> HourlySlot {
        HourlySlot {
            label: label.to_string(),
            temp: 3,
            icon,
        }
    }

    #[test]
    fn test_new_panel_is_loading() {
        let panel = TextPanel::new(6);
        assert!(panel.is_loading());
        assert_eq!(panel.weekday_card_count(), 6);
        assert_eq!(panel.to_string(), "Loading...\n");
    }

    #[test]
    fn test_missing_icon_keeps_previous_image() {
        let mut panel = TextPanel::new(1);
        panel.set_hourly_slot(0, &slot("now", resolve_tag("rain")));
        panel.set_hourly_slot(0, &slot("now", None));
        assert_eq!(
            panel.hourly_slot(0).and_then(|s| s.icon).map(|i| i.alt),
            Some("rain")
        );
    }

    #[test]
    fn test_out_of_range_slots_are_ignored() {
        let mut panel = TextPanel::new(2);
        panel.set_hourly_slot(WINDOW_LEN, &slot("late", None));
        panel.set_weekday_card(
            2,
            &WeekdayCard {
                weekday: "Monday",
                icon: None,
                min: 0,
                max: 1,
            },
        );
        assert!(panel.hourly_slot(WINDOW_LEN).is_none());
        assert!(panel.weekday_card(2).is_none());
    }

    #[test]
    fn test_clear_search_input() {
        let mut panel = TextPanel::new(1);
        panel.set_search_input("Lisbon");
        panel.clear_search_input();
        assert_eq!(panel.search_input(), "");
    }

    #[test]
    fn test_display_shows_body_after_loading() {
        let mut panel = TextPanel::new(1);
        panel.set_current_temp("12°C");
        panel.set_city_label("in Lisbon is");
        panel.set_description("Clear");
        panel.set_loading(false);

        let text = panel.to_string();
        assert!(text.starts_with("12°C in Lisbon is (-)\nClear\n"));
        assert!(!text.contains("background"));
    }

    #[test]
    fn test_display_prints_background_gradient() {
        let mut panel = TextPanel::new(1);
        panel.set_current_temp("-3°C");
        panel.set_background(Gradient::Freezing);
        panel.set_loading(false);

        let text = panel.to_string();
        assert!(text.contains(
            "background <=0 linear-gradient(135deg, #d7e8f7, #6c849e)\n"
        ));
    }
}
