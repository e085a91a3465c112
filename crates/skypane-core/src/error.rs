//! Error hierarchy shared by every Skypane crate.
//!
//! Lower crates keep their own precise error enums and map into
//! [`AppError`] at the edge; `user_message()` is what the panel prints.

use thiserror::Error;

/// Anything that can stop the panel from showing a forecast.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Forecast service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Render error: {0}")]
    Render(#[from] RenderFailure),
}

impl AppError {
    /// Short, non-technical text for the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Render(e) => e.user_message(),
        }
    }
}

/// Transport-level failures talking to the forecast or geocoding APIs.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Could not reach host: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Unreadable response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => "No connection. Check your network and retry.",
            NetworkError::Timeout => "The weather service took too long to answer.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Try again later."
            }
            NetworkError::ServerError { .. } => "The weather service rejected the request.",
            NetworkError::InvalidResponse(_) => "The weather service sent data we could not read.",
        }
    }
}

/// Lookup failures on the weather side: places, keys, timezones.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No place matches '{0}'")]
    LocationNotFound(String),

    #[error("Forecast lookup failed: {0}")]
    ApiError(String),

    #[error("API key rejected")]
    InvalidApiKey,

    #[error("Position unavailable")]
    ServiceUnavailable,

    #[error("Timezone unavailable for {0}")]
    TimezoneUnavailable(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "No place by that name. Check the spelling.",
            WeatherError::ApiError(_) => "The forecast could not be loaded.",
            WeatherError::InvalidApiKey => "An API key was rejected. Check your config file.",
            WeatherError::ServiceUnavailable => {
                "Your position is unknown. Search for a city or set one in the config file."
            }
            WeatherError::TimezoneUnavailable(_) => {
                "Could not determine the local time for that place."
            }
        }
    }
}

/// Forecast payloads that cannot fill the panel.
#[derive(Debug, Error)]
pub enum RenderFailure {
    #[error("Forecast is missing data: {0}")]
    InsufficientData(String),

    #[error("Forecast contains invalid data: {0}")]
    InvalidData(String),
}

impl RenderFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            RenderFailure::InsufficientData(_) => {
                "The forecast is incomplete. Please try again later."
            }
            RenderFailure::InvalidData(_) => "The forecast could not be read.",
        }
    }
}

/// Classify a `reqwest` failure by what went wrong on the wire.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            return NetworkError::Timeout;
        }
        if self.is_decode() {
            return NetworkError::InvalidResponse(self.to_string());
        }
        match self.status() {
            Some(status) => NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            },
            None => NetworkError::ConnectionFailed(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_message() {
        let errors = [
            AppError::Network(NetworkError::Timeout),
            AppError::Weather(WeatherError::ServiceUnavailable),
            AppError::Render(RenderFailure::InsufficientData("days".into())),
        ];

        for err in &errors {
            assert!(!err.user_message().is_empty(), "empty message for {err:?}");
        }
    }

    #[test]
    fn test_weather_error_converts() {
        let app_err: AppError = WeatherError::InvalidApiKey.into();
        assert!(matches!(app_err, AppError::Weather(WeatherError::InvalidApiKey)));
    }

    #[test]
    fn test_missing_place_message() {
        let app_err = AppError::Weather(WeatherError::LocationNotFound("Atlantis".into()));
        assert_eq!(
            app_err.user_message(),
            "No place by that name. Check the spelling."
        );
        assert_eq!(app_err.to_string(), "Forecast service error: No place matches 'Atlantis'");
    }

    #[test]
    fn test_server_error_message_depends_on_status() {
        let upstream = NetworkError::ServerError {
            status: 503,
            message: "down".into(),
        };
        let client = NetworkError::ServerError {
            status: 400,
            message: "bad".into(),
        };
        assert!(upstream.user_message().contains("trouble"));
        assert!(client.user_message().contains("rejected"));
    }
}
