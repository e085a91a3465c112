//! Weather service for Skypane
//!
//! Fetches forecast payloads from Visual Crossing, resolves free-text
//! places through OpenWeatherMap geocoding and maps coordinates to their
//! local time.

pub mod types;
pub mod geocode;
pub mod location;
pub mod provider;

pub use types::*;
pub use geocode::{GeocodingClient, GeocodingService};
pub use location::{
    current_local_hour, local_hour_at, ConfiguredPosition, PositionSource, TimezoneResolver,
    TzfResolver,
};
pub use provider::{WeatherProvider, WeatherService};
