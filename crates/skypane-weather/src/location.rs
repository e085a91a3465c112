//! Where the user is, and what time it is there.

use crate::types::{Coordinates, LocationError};
use async_trait::async_trait;
use chrono::{DateTime, Local, Timelike, Utc};
use chrono_tz::Tz;
use tzf_rs::DefaultFinder;

/// Source of the device position used at startup
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from configuration; `None` behaves like a missing sensor
#[derive(Debug, Clone, Default)]
pub struct ConfiguredPosition {
    coordinates: Option<Coordinates>,
}

impl ConfiguredPosition {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl PositionSource for ConfiguredPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::ServiceUnavailable)
    }
}

/// Maps a coordinate to its IANA timezone name
pub trait TimezoneResolver: Send + Sync {
    fn timezone_at(&self, coordinates: Coordinates) -> Result<String, LocationError>;
}

/// Offline timezone lookup backed by the bundled tzf polygon data
pub struct TzfResolver {
    finder: DefaultFinder,
}

impl TzfResolver {
    /// Loads the polygon index; construct once and share
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneResolver for TzfResolver {
    fn timezone_at(&self, coordinates: Coordinates) -> Result<String, LocationError> {
        let name = self
            .finder
            .get_tz_name(coordinates.longitude, coordinates.latitude);
        if name.is_empty() {
            return Err(LocationError::UnknownTimezone(coordinates.to_string()));
        }
        Ok(name.to_string())
    }
}

/// Hour of day (0-23) at `now` in the named zone
pub fn local_hour_at(timezone: &str, now: DateTime<Utc>) -> Result<u32, LocationError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| LocationError::UnknownTimezone(timezone.to_string()))?;
    Ok(now.with_timezone(&tz).hour())
}

/// Hour of day on the system clock
pub fn current_local_hour() -> u32 {
    Local::now().hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_configured_position() {
        let source = ConfiguredPosition::new(Some(Coordinates::new(50.45, 30.52)));
        let position = source.current_position().await.unwrap();
        assert_eq!(position, Coordinates::new(50.45, 30.52));
    }

    #[tokio::test]
    async fn test_missing_position_is_unavailable() {
        let source = ConfiguredPosition::default();
        let result = source.current_position().await;
        assert!(matches!(result, Err(LocationError::ServiceUnavailable)));
    }

    #[test]
    fn test_local_hour_crosses_date_line() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 22, 30, 0).unwrap();
        assert_eq!(local_hour_at("Asia/Tokyo", now).unwrap(), 7);
        assert_eq!(local_hour_at("America/New_York", now).unwrap(), 17);
        assert_eq!(local_hour_at("UTC", now).unwrap(), 22);
    }

    #[test]
    fn test_local_hour_respects_dst() {
        // 2024-07-01 is summer time in Berlin (UTC+2)
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(local_hour_at("Europe/Berlin", now).unwrap(), 14);
    }

    #[test]
    fn test_local_hour_unknown_zone() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let result = local_hour_at("Mars/Olympus_Mons", now);
        assert!(matches!(result, Err(LocationError::UnknownTimezone(_))));
    }

    #[test]
    fn test_current_local_hour_in_range() {
        assert!(current_local_hour() < 24);
    }

    #[test]
    fn test_tzf_resolver_known_cities() {
        let resolver = TzfResolver::new();
        assert_eq!(
            resolver
                .timezone_at(Coordinates::new(40.7128, -74.0060))
                .unwrap(),
            "America/New_York"
        );
        assert_eq!(
            resolver
                .timezone_at(Coordinates::new(35.6762, 139.6503))
                .unwrap(),
            "Asia/Tokyo"
        );
    }
}
