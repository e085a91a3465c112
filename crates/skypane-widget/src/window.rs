//! Hourly strip selection: "now" and the next five hours, which may run
//! into tomorrow.

use skypane_weather::{DayForecast, HourForecast};

use crate::error::RenderError;

/// Entries in the hourly strip
pub const WINDOW_LEN: usize = 6;

const HOURS_PER_DAY: usize = 24;

/// Pick the six hours starting at `reference_hour`.
///
/// When fewer than five hours remain today, the window continues from
/// hour 0 of `days[1]`.
///
/// # Errors
/// `InvalidReferenceHour` for hours above 23, `NotEnoughDays` or
/// `NotEnoughHours` when the payload cannot cover the window.
pub fn select_window(
    reference_hour: u32,
    days: &[DayForecast],
) -> Result<[&HourForecast; WINDOW_LEN], RenderError> {
    let start = usize::try_from(reference_hour)
        .ok()
        .filter(|h| *h < HOURS_PER_DAY)
        .ok_or(RenderError::InvalidReferenceHour(reference_hour))?;
    let remaining_today = HOURS_PER_DAY - 1 - start;

    let today = days.first().ok_or(RenderError::NotEnoughDays {
        needed: 1,
        available: 0,
    })?;

    let window: Vec<&HourForecast> = if remaining_today >= WINDOW_LEN - 1 {
        hours(today, 0, start..start + WINDOW_LEN)?.iter().collect()
    } else {
        let tomorrow = days.get(1).ok_or(RenderError::NotEnoughDays {
            needed: 2,
            available: days.len(),
        })?;
        let head = hours(today, 0, start..start + remaining_today + 1)?;
        let tail = hours(tomorrow, 1, 0..WINDOW_LEN - 1 - remaining_today)?;
        head.iter().chain(tail).collect()
    };

    let available = window.len();
    window.try_into().map_err(|_| RenderError::NotEnoughHours {
        day: 0,
        needed: WINDOW_LEN,
        available,
    })
}

fn hours(
    day: &DayForecast,
    index: usize,
    range: std::ops::Range<usize>,
) -> Result<&[HourForecast], RenderError> {
    let needed = range.end;
    day.hours.get(range).ok_or(RenderError::NotEnoughHours {
        day: index,
        needed,
        available: day.hours.len(),
    })
}

/// Strip label: "now" first, then "HH:MM" from the entry's own timestamp.
pub fn window_label(position: usize, hour: &HourForecast) -> String {
    if position == 0 {
        "now".to_string()
    } else {
        hour.datetime.chars().take(5).collect()
    }
}
