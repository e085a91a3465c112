//! Forecast provider: Visual Crossing timeline API.

use crate::types::{Coordinates, WeatherError, WeatherPayload};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const UNIT_GROUP: &str = "metric";

/// Anything that can produce a forecast payload for a coordinate
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherPayload, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherProvider {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn timeline_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/{},{}",
            self.base_url, coordinates.latitude, coordinates.longitude
        )
    }
}

#[async_trait]
impl WeatherService for WeatherProvider {
    #[instrument(skip(self), level = "info")]
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherPayload, WeatherError> {
        let mut request = self
            .client
            .get(self.timeline_url(coordinates))
            .query(&[("unitGroup", UNIT_GROUP)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
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
        let payload: WeatherPayload = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("forecast payload: {}", e)))?;

        tracing::debug!(
            "Fetched {} forecast day(s) for {}",
            payload.days.len(),
            payload.timezone
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload_json() -> serde_json::Value {
        serde_json::json!({
            "timezone": "Europe/Kyiv",
            "currentConditions": { "temp": 18.4, "icon": "cloudy" },
            "days": [
                { "datetime": "2024-06-10", "conditions": "Overcast", "icon": "cloudy",
                  "tempmin": 12.0, "tempmax": 19.0, "hours": [] },
                { "datetime": "2024-06-11", "conditions": "Rain", "icon": "rain",
                  "tempmin": 11.0, "tempmax": 16.0, "hours": [] }
            ]
        })
    }

    fn provider(server: &MockServer, key: Option<&str>) -> WeatherProvider {
        WeatherProvider::new(
            &server.uri(),
            key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_requests_metric_timeline() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/50.45,30.52"))
            .and(query_param("unitGroup", "metric"))
            .and(query_param("key", "vc-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload = provider(&mock_server, Some("vc-key"))
            .fetch(Coordinates::new(50.45, 30.52))
            .await
            .unwrap();

        assert_eq!(payload.timezone, "Europe/Kyiv");
        assert_eq!(payload.days.len(), 2);
        assert_eq!(payload.days[1].icon, "rain");
    }

    #[tokio::test]
    async fn test_fetch_unauthorized_maps_to_invalid_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("No account found"))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server, Some("bad"))
            .fetch(Coordinates::new(1.0, 2.0))
            .await;

        assert!(matches!(result, Err(WeatherError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_fetch_server_error_keeps_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server, None)
            .fetch(Coordinates::new(1.0, 2.0))
            .await;

        match result {
            Err(WeatherError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server, None)
            .fetch(Coordinates::new(1.0, 2.0))
            .await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider =
            WeatherProvider::new("https://example.test/timeline/", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            provider.timeline_url(Coordinates::new(-33.87, 151.21)),
            "https://example.test/timeline/-33.87,151.21"
        );
    }
}
