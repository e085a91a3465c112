//! Forward geocoding: convert a free-text place name to coordinates.
//! Uses the OpenWeatherMap direct geocoding endpoint.

use crate::types::{GeocodeResult, WeatherError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

/// Anything that can turn a place name into ranked candidates
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Candidates ordered best match first; may be empty
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    limit: u32,
}

impl GeocodingClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        limit: u32,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            limit: limit.max(1),
        })
    }
}

#[async_trait]
impl GeocodingService for GeocodingClient {
    #[instrument(skip(self), level = "info")]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, WeatherError> {
        let url = format!("{}/direct", self.base_url);
        let limit = self.limit.to_string();

        let mut request = self
            .client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("appid", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WeatherError::InvalidApiKey);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let results: Vec<GeocodeResult> = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("geocoding response: {}", e)))?;

        match results.first() {
            Some(best) => tracing::info!(
                "Geocoded '{}' to {} ({} candidate(s))",
                query,
                best.coordinates(),
                results.len()
            ),
            None => tracing::debug!("No geocoding candidates for '{}'", query),
        }

        Ok(results)
    }
}
