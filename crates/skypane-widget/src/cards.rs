use chrono::{Datelike, NaiveDate};
use skypane_weather::DayForecast;

use crate::display::whole_degrees;
use crate::error::RenderError;
use crate::icons::{resolve_tag, IconAsset};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One upcoming day in the weekly row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayCard {
    pub weekday: &'static str,
    pub icon: Option<IconAsset>,
    pub min: i64,
    pub max: i64,
}

/// English weekday for an ISO `YYYY-MM-DD` date.
pub fn weekday_name(date: &str) -> Option<&'static str> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    WEEKDAYS
        .get(date.weekday().num_days_from_sunday() as usize)
        .copied()
}

/// Build `count` cards; card `i` shows `days[i + 1]` since `days[0]` is today.
///
/// # Errors
/// `NotEnoughDays` when fewer than `count + 1` days are present,
/// `InvalidDate` for an unreadable day date.
pub fn map_cards(days: &[DayForecast], count: usize) -> Result<Vec<WeekdayCard>, RenderError> {
    let upcoming = days.get(1..=count).ok_or(RenderError::NotEnoughDays {
        needed: count + 1,
        available: days.len(),
    })?;

    upcoming
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let weekday = weekday_name(&day.datetime).ok_or_else(|| RenderError::InvalidDate {
                day: i + 1,
                value: day.datetime.clone(),
            })?;
            Ok(WeekdayCard {
                weekday,
                icon: resolve_tag(&day.icon),
                min: whole_degrees(day.tempmin),
                max: whole_degrees(day.tempmax),
            })
        })
        .collect()
}
