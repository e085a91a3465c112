//! Async backends for the widget. Network work runs on the tokio runtime
//! and results come back to the panel owner over `std::sync::mpsc`.

pub mod weather_service;

use std::sync::Arc;
use std::time::Duration;

use skypane_core::Config;
use skypane_weather::{
    ConfiguredPosition, Coordinates, GeocodingClient, GeocodingService, PositionSource,
    TimezoneResolver, TzfResolver, WeatherError, WeatherProvider, WeatherService,
};

pub use weather_service::{
    fetch_for_city, fetch_for_position, request_bootstrap, request_city_search, resolve_city_at,
    FetchOrigin, FetchedForecast, ResolvedCity, WeatherServiceMessage,
};

/// Shared handles to every backend the fetch flows need
#[derive(Clone)]
pub struct WidgetServices {
    pub weather: Arc<dyn WeatherService>,
    pub geocoder: Arc<dyn GeocodingService>,
    pub timezones: Arc<dyn TimezoneResolver>,
    pub position: Arc<dyn PositionSource>,
}

impl WidgetServices {
    pub fn new(
        weather: Arc<dyn WeatherService>,
        geocoder: Arc<dyn GeocodingService>,
        timezones: Arc<dyn TimezoneResolver>,
        position: Arc<dyn PositionSource>,
    ) -> Self {
        Self {
            weather,
            geocoder,
            timezones,
            position,
        }
    }

    /// Build the HTTP-backed services described by `config`.
    ///
    /// # Errors
    /// `WeatherError` when either HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let weather = WeatherProvider::new(
            &config.weather.base_url,
            config.weather.api_key.clone(),
            Duration::from_secs(config.weather.timeout_secs),
        )?;
        let geocoder = GeocodingClient::new(
            &config.geocoding.base_url,
            config.geocoding.api_key.clone(),
            config.geocoding.result_limit,
            Duration::from_secs(config.geocoding.timeout_secs),
        )?;
        let position = ConfiguredPosition::new(
            config
                .location
                .coordinates()
                .map(|(lat, lon)| Coordinates::new(lat, lon)),
        );

        tracing::info!(
            "Weather services ready (position configured: {})",
            config.location.coordinates().is_some()
        );

        Ok(Self::new(
            Arc::new(weather),
            Arc::new(geocoder),
            Arc::new(TzfResolver::new()),
            Arc::new(position),
        ))
    }
}

impl std::fmt::Debug for WidgetServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetServices").finish_non_exhaustive()
    }
}
