//! Widget error types.

use skypane_weather::{LocationError, WeatherError};
use thiserror::Error;

/// A payload that cannot fill the panel's slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Reference hour {0} is outside 0-23")]
    InvalidReferenceHour(u32),

    #[error("Forecast has {available} day(s), panel needs {needed}")]
    NotEnoughDays { needed: usize, available: usize },

    #[error("Forecast day {day} has {available} hour(s), panel needs {needed}")]
    NotEnoughHours {
        day: usize,
        needed: usize,
        available: usize,
    },

    #[error("Forecast day {day} has unreadable date '{value}'")]
    InvalidDate { day: usize, value: String },
}

/// Failure anywhere in a locate, fetch and render chain.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl ServiceError {
    /// Position could not be determined; the panel just keeps waiting.
    pub fn is_position_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Location(
                LocationError::ServiceUnavailable
                    | LocationError::PermissionDenied
                    | LocationError::Timeout
            )
        )
    }
}
