//! The panel content derived from one payload.

use skypane_weather::{HourForecast, WeatherPayload};

use crate::background::{select_gradient, Gradient};
use crate::cards::{map_cards, WeekdayCard};
use crate::error::RenderError;
use crate::icons::{resolve_tag, IconAsset};
use crate::window::{select_window, window_label, WINDOW_LEN};

/// One entry of the hourly strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlySlot {
    pub label: String,
    /// Whole degrees, floored
    pub temp: i64,
    pub icon: Option<IconAsset>,
}

impl HourlySlot {
    fn from_hour(position: usize, hour: &HourForecast) -> Self {
        Self {
            label: window_label(position, hour),
            temp: whole_degrees(hour.temp),
            icon: resolve_tag(&hour.icon),
        }
    }
}

/// Everything the panel shows, built fresh for every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    /// `None` when the reading is NaN
    pub current_temp: Option<i64>,
    pub current_icon: Option<IconAsset>,
    pub background: Option<Gradient>,
    pub city_label: String,
    pub description: String,
    pub hourly: [HourlySlot; WINDOW_LEN],
    pub cards: Vec<WeekdayCard>,
}

impl DisplayModel {
    /// # Errors
    /// Any `RenderError` from the hourly window or the weekday cards.
    pub fn build(
        payload: &WeatherPayload,
        reference_hour: u32,
        card_count: usize,
    ) -> Result<Self, RenderError> {
        let today = payload.days.first().ok_or(RenderError::NotEnoughDays {
            needed: card_count.max(1) + 1,
            available: 0,
        })?;

        let window = select_window(reference_hour, &payload.days)?;
        let hourly = std::array::from_fn(|i| HourlySlot::from_hour(i, window[i]));
        let cards = map_cards(&payload.days, card_count)?;

        Ok(Self {
            current_temp: current_degrees(payload.current_conditions.temp),
            current_icon: resolve_tag(&today.icon),
            background: select_gradient(payload.current_conditions.temp),
            city_label: format!("in {} is", city_from_timezone(&payload.timezone)),
            description: today.conditions.clone(),
            hourly,
            cards,
        })
    }
}

/// Temperatures are shown floored, so -0.5 reads as -1
pub fn whole_degrees(temp: f64) -> i64 {
    temp.floor() as i64
}

fn current_degrees(temp: f64) -> Option<i64> {
    (!temp.is_nan()).then(|| whole_degrees(temp))
}

pub fn format_temp(degrees: i64) -> String {
    format!("{degrees}°C")
}

/// "Europe/Kyiv" -> "Kyiv"; zones without a region part are shown whole.
fn city_from_timezone(timezone: &str) -> String {
    timezone
        .split('/')
        .nth(1)
        .unwrap_or(timezone)
        .replace('_', " ")
}
