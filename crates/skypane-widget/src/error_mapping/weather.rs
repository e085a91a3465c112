use crate::error::ServiceError;
use skypane_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError as CoreWeatherError};
use skypane_weather::{LocationError, WeatherError};

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Weather(e) => weather_error(e),
            ServiceError::Location(e) => location_error(e),
            ServiceError::Render(e) => e.into(),
        }
    }
}

fn weather_error(e: WeatherError) -> AppError {
    match e {
        WeatherError::Network(e) => AppError::Network(e.into_network_error()),
        WeatherError::Location(e) => location_error(e),
        WeatherError::LocationNotFound(q) => {
            AppError::Weather(CoreWeatherError::LocationNotFound(q))
        }
        WeatherError::InvalidApiKey => AppError::Weather(CoreWeatherError::InvalidApiKey),
        WeatherError::Api { status, message } => {
            AppError::Network(NetworkError::ServerError { status, message })
        }
        WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
    }
}

fn location_error(e: LocationError) -> AppError {
    match e {
        LocationError::UnknownTimezone(s) => {
            AppError::Weather(CoreWeatherError::TimezoneUnavailable(s))
        }
        LocationError::PermissionDenied
        | LocationError::ServiceUnavailable
        | LocationError::Timeout => AppError::Weather(CoreWeatherError::ServiceUnavailable),
        LocationError::Other(s) => AppError::Weather(CoreWeatherError::ApiError(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_keeps_its_message() {
        let err: AppError = ServiceError::Weather(WeatherError::InvalidApiKey).into();
        assert!(matches!(err, AppError::Weather(CoreWeatherError::InvalidApiKey)));
    }

    #[test]
    fn server_status_is_preserved() {
        let err: AppError = ServiceError::Weather(WeatherError::Api {
            status: 503,
            message: "busy".into(),
        })
        .into();
        assert!(matches!(
            err,
            AppError::Network(NetworkError::ServerError { status: 503, .. })
        ));
    }

    #[test]
    fn unknown_timezone_maps_to_timezone_unavailable() {
        let err: AppError =
            ServiceError::Location(LocationError::UnknownTimezone("0, 0".into())).into();
        assert!(matches!(
            err,
            AppError::Weather(CoreWeatherError::TimezoneUnavailable(_))
        ));
    }

    #[test]
    fn missing_city_maps_to_location_not_found() {
        let err: AppError =
            ServiceError::Weather(WeatherError::LocationNotFound("Atlantis".into())).into();
        assert!(matches!(
            err,
            AppError::Weather(CoreWeatherError::LocationNotFound(ref q)) if q == "Atlantis"
        ));
    }
}
