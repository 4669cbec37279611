use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::WeatherSnapshot;
use crate::{Result, StatewatchError};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Open-Meteo current-conditions client (no API key)
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentData,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    relative_humidity: f64,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: f64,
}

impl From<CurrentData> for WeatherSnapshot {
    fn from(current: CurrentData) -> Self {
        Self {
            temperature_celsius: current.temperature,
            humidity_percent: current.relative_humidity,
            wind_speed_kph: current.wind_speed,
        }
    }
}

impl OpenMeteoClient {
    #[must_use]
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Best-effort current conditions; any failure yields `None`
    pub async fn current(&self, latitude: f64, longitude: f64) -> Option<WeatherSnapshot> {
        match self.fetch_current(latitude, longitude).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Weather fetch error: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        let url = format!("{}/forecast", self.base_url);
        debug!("Requesting current weather at ({:.4}, {:.4})", latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatewatchError::api(format!(
                "Open-Meteo returned status {}",
                status.as_u16()
            )));
        }

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            StatewatchError::api(format!("Failed to parse Open-Meteo response: {e}"))
        })?;

        Ok(forecast.current.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        let config = WeatherConfig {
            base_url: server.uri(),
        };
        OpenMeteoClient::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "34.05"))
            .and(query_param("current", CURRENT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 34.05,
                "longitude": -118.24,
                "current": {
                    "time": "2025-06-01T14:00",
                    "temperature_2m": 20.0,
                    "relative_humidity_2m": 55,
                    "wind_speed_10m": 10.0
                }
            })))
            .mount(&server)
            .await;

        let snapshot = client_for(&server).current(34.05, -118.24).await.unwrap();
        assert_eq!(snapshot.temperature_celsius, 20.0);
        assert_eq!(snapshot.humidity_percent, 55.0);
        assert_eq!(snapshot.wind_speed_kph, 10.0);
    }

    #[tokio::test]
    async fn test_http_error_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client_for(&server).current(40.0, -100.0).await.is_none());
        let err = client_for(&server).fetch_current(40.0, -100.0).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_unexpected_shape_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": true})))
            .mount(&server)
            .await;

        assert!(client_for(&server).current(40.0, -100.0).await.is_none());
    }
}
