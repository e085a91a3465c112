//! Weather backend: startup and city-search fetch chains.
//! All network work runs off the panel thread; results sent via mpsc.

use std::sync::mpsc::Sender;

use chrono::{DateTime, Utc};
use skypane_weather::{current_local_hour, local_hour_at, Coordinates, WeatherError, WeatherPayload};
use tokio::runtime::Handle;

use super::WidgetServices;
use crate::error::ServiceError;

/// What started a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Device position at startup
    Position,
    /// A submitted city search
    Search(String),
}

/// A payload ready to render, with the hour its window starts at
#[derive(Debug, Clone)]
pub struct FetchedForecast {
    pub payload: WeatherPayload,
    pub reference_hour: u32,
    pub origin: FetchOrigin,
}

/// A geocoded search with the local hour at that place
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCity {
    pub coordinates: Coordinates,
    pub timezone: String,
    pub local_hour: u32,
}

/// Messages sent from async operations back to the panel owner
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// The search resolved to a place; the input can be cleared
    SearchResolved { query: String },
    /// Result of a whole fetch chain
    FetchDone(Result<FetchedForecast, ServiceError>),
}

/// Position, then forecast. The window starts at the system clock hour.
///
/// # Errors
/// `ServiceError::Location` when no position is known, `ServiceError::Weather`
/// when the forecast request fails.
pub async fn fetch_for_position(services: &WidgetServices) -> Result<FetchedForecast, ServiceError> {
    let coordinates = services.position.current_position().await?;
    tracing::info!("Got position: {}", coordinates);

    let payload = services.weather.fetch(coordinates).await?;
    Ok(FetchedForecast {
        payload,
        reference_hour: current_local_hour(),
        origin: FetchOrigin::Position,
    })
}

/// Geocode `query` and work out the local hour there at `now`.
///
/// Only the first geocoding match is used.
///
/// # Errors
/// `ServiceError::Weather` for a failed or empty geocoding lookup,
/// `ServiceError::Location` when the place has no known timezone.
pub async fn resolve_city_at(
    services: &WidgetServices,
    query: &str,
    now: DateTime<Utc>,
) -> Result<ResolvedCity, ServiceError> {
    let matches = services.geocoder.geocode(query).await?;
    let first = matches
        .first()
        .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))?;
    let coordinates = first.coordinates();

    let timezone = services.timezones.timezone_at(coordinates)?;
    let local_hour = local_hour_at(&timezone, now)?;
    tracing::info!(
        "Resolved '{}' to {} ({}, local hour {})",
        query,
        coordinates,
        timezone,
        local_hour
    );

    Ok(ResolvedCity {
        coordinates,
        timezone,
        local_hour,
    })
}

/// Forecast for an already resolved search.
///
/// # Errors
/// `ServiceError::Weather` when the forecast request fails.
pub async fn fetch_for_city(
    services: &WidgetServices,
    query: &str,
    city: &ResolvedCity,
) -> Result<FetchedForecast, ServiceError> {
    let payload = services.weather.fetch(city.coordinates).await?;
    Ok(FetchedForecast {
        payload,
        reference_hour: city.local_hour,
        origin: FetchOrigin::Search(query.to_string()),
    })
}

/// Spawn the startup chain. Sends `FetchDone` on the channel when complete.
pub fn request_bootstrap(
    runtime: &Handle,
    tx: &Sender<WeatherServiceMessage>,
    services: WidgetServices,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = fetch_for_position(&services).await;
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
}

/// Spawn a city search. Returns `false` without spawning for a blank query.
///
/// Sends `SearchResolved` once the place is known, then `FetchDone`.
pub fn request_city_search(
    runtime: &Handle,
    tx: &Sender<WeatherServiceMessage>,
    services: WidgetServices,
    query: &str,
) -> bool {
    let query = query.trim().to_string();
    if query.is_empty() {
        return false;
    }

    let tx = tx.clone();
    runtime.spawn(async move {
        let city = match resolve_city_at(&services, &query, Utc::now()).await {
            Ok(city) => city,
            Err(e) => {
                let _ = tx.send(WeatherServiceMessage::FetchDone(Err(e)));
                return;
            }
        };

        let _ = tx.send(WeatherServiceMessage::SearchResolved {
            query: query.clone(),
        });

        let result = fetch_for_city(&services, &query, &city).await;
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use skypane_weather::{
        CurrentConditions, GeocodeResult, GeocodingService, LocationError, PositionSource,
        TimezoneResolver, WeatherService,
    };
    use std::sync::{Arc, Mutex};

    struct FixedWeather {
        seen: Mutex<Vec<Coordinates>>,
    }

    #[async_trait]
    impl WeatherService for FixedWeather {
        async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherPayload, WeatherError> {
            self.seen.lock().unwrap().push(coordinates);
            Ok(WeatherPayload {
                timezone: "Europe/Lisbon".to_string(),
                current_conditions: CurrentConditions {
                    temp: 18.0,
                    icon: "clear-day".to_string(),
                },
                days: Vec::new(),
            })
        }
    }

    struct FixedGeocoder(Vec<GeocodeResult>);

    #[async_trait]
    impl GeocodingService for FixedGeocoder {
        async fn geocode(&self, _query: &str) -> Result<Vec<GeocodeResult>, WeatherError> {
            Ok(self.0.clone())
        }
    }

    struct FixedZone(&'static str);

    impl TimezoneResolver for FixedZone {
        fn timezone_at(&self, _coordinates: Coordinates) -> Result<String, LocationError> {
            Ok(self.0.to_string())
        }
    }

    struct NoPosition;

    #[async_trait]
    impl PositionSource for NoPosition {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    fn lisbon() -> GeocodeResult {
        GeocodeResult {
            lat: 38.7223,
            lon: -9.1393,
            name: Some("Lisbon".to_string()),
            country: Some("PT".to_string()),
            state: None,
        }
    }

    fn services(geocoded: Vec<GeocodeResult>, weather: Arc<FixedWeather>) -> WidgetServices {
        WidgetServices::new(
            weather,
            Arc::new(FixedGeocoder(geocoded)),
            Arc::new(FixedZone("Asia/Tokyo")),
            Arc::new(NoPosition),
        )
    }

    fn weather() -> Arc<FixedWeather> {
        Arc::new(FixedWeather {
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_resolve_city_uses_first_match_and_its_zone() {
        let mut second = lisbon();
        second.lat = 0.0;
        let services = services(vec![lisbon(), second], weather());
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();

        let city = resolve_city_at(&services, "Lisbon", now).await.unwrap();
        assert_eq!(city.coordinates, Coordinates::new(38.7223, -9.1393));
        assert_eq!(city.timezone, "Asia/Tokyo");
        // 12:00 UTC is 21:00 in Tokyo
        assert_eq!(city.local_hour, 21);
    }

    #[tokio::test]
    async fn test_resolve_city_without_match() {
        let services = services(Vec::new(), weather());
        let err = resolve_city_at(&services, "Atlantis", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Weather(WeatherError::LocationNotFound(ref q)) if q == "Atlantis"
        ));
    }

    #[tokio::test]
    async fn test_fetch_for_city_uses_resolved_hour() {
        let weather = weather();
        let services = services(vec![lisbon()], weather.clone());
        let city = ResolvedCity {
            coordinates: Coordinates::new(38.7223, -9.1393),
            timezone: "Europe/Lisbon".to_string(),
            local_hour: 7,
        };

        let fetched = fetch_for_city(&services, "Lisbon", &city).await.unwrap();
        assert_eq!(fetched.reference_hour, 7);
        assert_eq!(fetched.origin, FetchOrigin::Search("Lisbon".to_string()));
        assert_eq!(
            weather.seen.lock().unwrap().as_slice(),
            &[Coordinates::new(38.7223, -9.1393)]
        );
    }

    #[tokio::test]
    async fn test_position_failure_is_reported() {
        let weather = weather();
        let services = services(Vec::new(), weather.clone());
        let err = fetch_for_position(&services).await.unwrap_err();

        assert!(err.is_position_unavailable());
        assert!(weather.seen.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_blank_search_spawns_nothing() {
        let (tx, rx) = std::sync::mpsc::channel();
        let services = services(vec![lisbon()], weather());

        assert!(!request_city_search(&Handle::current(), &tx, services, "   "));
        drop(tx);
        assert!(rx.recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_city_search_sends_resolved_then_done() {
        let (tx, rx) = std::sync::mpsc::channel();
        let services = services(vec![lisbon()], weather());

        assert!(request_city_search(&Handle::current(), &tx, services, "  Lisbon "));
        drop(tx);

        let rx = tokio::task::spawn_blocking(move || rx.iter().collect::<Vec<_>>())
            .await
            .unwrap();
        assert_eq!(rx.len(), 2);
        assert!(matches!(
            &rx[0],
            WeatherServiceMessage::SearchResolved { query } if query == "Lisbon"
        ));
        assert!(matches!(&rx[1], WeatherServiceMessage::FetchDone(Ok(_))));
    }
}
