use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::config::AirNowConfig;
use crate::geo::{self, GeoPoint};
use crate::models::{PollutantKind, PollutantReading, Pollutants, StateIdentity};
use crate::{Result, StatewatchError};

pub const TIMEOUT_MESSAGE: &str =
    "Request timed out. The air quality service is responding slowly. Please try again.";
pub const NETWORK_MESSAGE: &str =
    "Unable to retrieve air quality data. The service may be temporarily unavailable.";
pub const NO_DATA_MESSAGE: &str = "Data currently unavailable for this state";

/// AirNow current-observation client
pub struct AirNowClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    radius_miles: u32,
}

/// One element of the provider's observation array
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AirNowObservation {
    #[serde(default)]
    pub date_observed: Option<String>,
    #[serde(default)]
    pub hour_observed: Option<u32>,
    #[serde(default)]
    pub reporting_area: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub parameter_name: Option<String>,
    #[serde(rename = "AQI", default)]
    pub aqi: Option<i32>,
    #[serde(default)]
    pub category: Option<AirNowCategory>,
}

impl AirNowObservation {
    fn is(&self, kind: PollutantKind) -> bool {
        self.parameter_name.as_deref().is_some_and(|name| kind.matches(name))
    }

    /// Reading for this entry; `None` when AQI or category is missing
    fn reading(&self) -> Option<PollutantReading> {
        let category = self.category.as_ref()?;
        Some(PollutantReading::new(
            u32::try_from(self.aqi?).unwrap_or(0),
            category.name.clone(),
            category.number,
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AirNowCategory {
    pub number: u8,
    pub name: String,
}

/// Parsed pollutant data for a state
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantFetch {
    pub state_code: String,
    pub reporting_area: String,
    pub date_observed: Option<String>,
    pub hour_observed: Option<u32>,
    pub pollutants: Pollutants,
    /// Best available coordinates for the follow-up weather call
    pub latitude: f64,
    pub longitude: f64,
}

/// Handled outcomes of a pollutant call
#[derive(Debug, Clone, PartialEq)]
pub enum PollutantOutcome {
    Available(PollutantFetch),
    Unavailable(String),
}

impl AirNowClient {
    #[must_use]
    pub fn new(client: Client, config: &AirNowConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            radius_miles: config.search_radius_miles,
        }
    }

    /// Fetch current observations around the state's representative postal code.
    ///
    /// Timeouts, transport failures, non-2xx statuses and empty results are
    /// returned as [`PollutantOutcome::Unavailable`]; only an unreadable
    /// success body is an `Err`.
    #[instrument(skip(self, api_key))]
    pub async fn fetch(&self, state_code: &str, api_key: &str) -> Result<PollutantOutcome> {
        let geo = geo::lookup(state_code);
        if StateIdentity::from_code(state_code).is_none() {
            warn!("Unrecognized state code {}, using fallback location", state_code);
        }
        info!(
            "Fetching air quality data for state: {} with zip: {}",
            state_code, geo.postal_code
        );

        let url = format!("{}/aq/observation/zipCode/current/", self.base_url);
        let radius = self.radius_miles.to_string();

        let response = match self
            .client
            .get(&url)
            .query(&[
                ("format", "application/json"),
                ("zipCode", geo.postal_code),
                ("distance", radius.as_str()),
                ("API_KEY", api_key),
            ])
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("AirNow API fetch error for {}: {}", state_code, e);
                return Ok(PollutantOutcome::Unavailable(transport_message(&e).to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("AirNow API error: {} - {}", status.as_u16(), error_text);
            return Ok(PollutantOutcome::Unavailable(format!(
                "Air quality data temporarily unavailable (Status: {})",
                status.as_u16()
            )));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                error!("AirNow API body timed out for {}: {}", state_code, e);
                return Ok(PollutantOutcome::Unavailable(TIMEOUT_MESSAGE.to_string()));
            }
            Err(e) => return Err(StatewatchError::from(e)),
        };

        // `null` means no data, same as an empty array
        let entries: Option<Vec<serde_json::Value>> = serde_json::from_str(&body).map_err(|e| {
            StatewatchError::api(format!("Failed to parse AirNow response: {e}"))
        })?;
        let observations = decode_observations(state_code, entries.unwrap_or_default());

        if observations.is_empty() {
            warn!("No data available for state: {}", state_code);
            return Ok(PollutantOutcome::Unavailable(NO_DATA_MESSAGE.to_string()));
        }

        Ok(PollutantOutcome::Available(parse_observations(
            state_code,
            &observations,
            geo,
        )))
    }
}

/// Decode entries one at a time so a single malformed row only loses itself
fn decode_observations(
    state_code: &str,
    entries: Vec<serde_json::Value>,
) -> Vec<AirNowObservation> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(observation) => Some(observation),
            Err(e) => {
                warn!("Skipping malformed AirNow observation for {}: {}", state_code, e);
                None
            }
        })
        .collect()
}

fn transport_message(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        TIMEOUT_MESSAGE
    } else {
        NETWORK_MESSAGE
    }
}

/// Fold a non-empty observation list into one record. The first entry
/// supplies area, timestamp and coordinates; each pollutant takes its first
/// matching entry that carries an AQI and category.
pub fn parse_observations(
    state_code: &str,
    observations: &[AirNowObservation],
    fallback: GeoPoint,
) -> PollutantFetch {
    let mut pollutants = Pollutants::default();
    for kind in PollutantKind::ALL {
        let reading = observations
            .iter()
            .filter(|obs| obs.is(kind))
            .find_map(AirNowObservation::reading);
        pollutants.set(kind, reading);
    }

    let first = observations.first();
    // 0.0 is how the provider reports a missing coordinate
    let latitude = first
        .and_then(|o| o.latitude)
        .filter(|lat| *lat != 0.0)
        .unwrap_or(fallback.latitude);
    let longitude = first
        .and_then(|o| o.longitude)
        .filter(|lon| *lon != 0.0)
        .unwrap_or(fallback.longitude);

    PollutantFetch {
        state_code: state_code.to_string(),
        reporting_area: first
            .and_then(|o| o.reporting_area.clone())
            .filter(|area| !area.trim().is_empty())
            .unwrap_or_else(|| state_code.to_string()),
        date_observed: first
            .and_then(|o| o.date_observed.as_deref())
            .map(|d| d.trim().to_string()),
        hour_observed: first.and_then(|o| o.hour_observed),
        pollutants,
        latitude,
        longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AirNowConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn observation(parameter: &str, aqi: i32, name: &str, number: u8) -> serde_json::Value {
        json!({
            "DateObserved": "2025-06-01 ",
            "HourObserved": 14,
            "LocalTimeZone": "PST",
            "ReportingArea": "Los Angeles",
            "StateCode": "CA",
            "Latitude": 34.05,
            "Longitude": -118.24,
            "ParameterName": parameter,
            "AQI": aqi,
            "Category": {"Number": number, "Name": name}
        })
    }

    fn client_for(server: &MockServer, timeout_seconds: u32) -> AirNowClient {
        let config = AirNowConfig {
            base_url: server.uri(),
            timeout_seconds,
            ..AirNowConfig::default()
        };
        AirNowClient::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_single_pm25_observation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/aq/observation/zipCode/current/"))
            .and(query_param("zipCode", "90001"))
            .and(query_param("distance", "100"))
            .and(query_param("API_KEY", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([observation("PM2.5", 42, "Good", 1)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server, 20).fetch("CA", "test-key").await.unwrap();
        let PollutantOutcome::Available(fetch) = outcome else {
            panic!("expected available outcome");
        };

        assert_eq!(fetch.pollutants.pm25, Some(PollutantReading::new(42, "Good", 1)));
        assert!(fetch.pollutants.pm10.is_none());
        assert!(fetch.pollutants.ozone.is_none());
        assert!(fetch.pollutants.no2.is_none());
        assert_eq!(fetch.reporting_area, "Los Angeles");
        assert_eq!(fetch.date_observed.as_deref(), Some("2025-06-01"));
        assert_eq!(fetch.hour_observed, Some(14));
        assert_eq!(fetch.latitude, 34.05);
    }

    #[tokio::test]
    async fn test_empty_array_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let outcome = client_for(&server, 20).fetch("CA", "k").await.unwrap();
        assert_eq!(outcome, PollutantOutcome::Unavailable(NO_DATA_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_null_body_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let outcome = client_for(&server, 20).fetch("CA", "k").await.unwrap();
        assert_eq!(outcome, PollutantOutcome::Unavailable(NO_DATA_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_bad_rows_do_not_discard_good_readings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                observation("PM2.5", 42, "Good", 1),
                {
                    "ParameterName": "PM10",
                    "AQI": null,
                    "Category": {"Number": 7, "Name": "Unavailable"}
                },
                {"ParameterName": "NO2", "AQI": "n/a"}
            ])))
            .mount(&server)
            .await;

        let outcome = client_for(&server, 20).fetch("CA", "k").await.unwrap();
        let PollutantOutcome::Available(fetch) = outcome else {
            panic!("expected available outcome");
        };
        assert_eq!(fetch.pollutants.pm25, Some(PollutantReading::new(42, "Good", 1)));
        assert!(fetch.pollutants.pm10.is_none());
        assert!(fetch.pollutants.no2.is_none());
    }

    #[tokio::test]
    async fn test_only_malformed_rows_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"AQI": {"value": 3}}])),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server, 20).fetch("CA", "k").await.unwrap();
        assert_eq!(outcome, PollutantOutcome::Unavailable(NO_DATA_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_http_error_embeds_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let outcome = client_for(&server, 20).fetch("TX", "k").await.unwrap();
        let PollutantOutcome::Unavailable(message) = outcome else {
            panic!("expected unavailable outcome");
        };
        assert!(message.contains("503"), "message was {message}");
    }

    #[tokio::test]
    async fn test_timeout_has_distinct_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server, 1).fetch("NY", "k").await.unwrap();
        assert_eq!(outcome, PollutantOutcome::Unavailable(TIMEOUT_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_connection_failure_is_generic_unavailable() {
        let config = AirNowConfig {
            // Nothing listens on the discard port
            base_url: "http://127.0.0.1:9".to_string(),
            ..AirNowConfig::default()
        };
        let client = AirNowClient::new(Client::new(), &config);
        let outcome = client.fetch("CA", "k").await.unwrap();
        assert_eq!(outcome, PollutantOutcome::Unavailable(NETWORK_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server, 20).fetch("CA", "k").await;
        assert!(matches!(result, Err(StatewatchError::Api { .. })));
    }

    #[test]
    fn test_parse_takes_first_match_and_ozone_synonym() {
        let observations: Vec<AirNowObservation> = serde_json::from_value(json!([
            observation("OZONE", 61, "Moderate", 2),
            observation("O3", 99, "Moderate", 2),
            observation("NO2", 12, "Good", 1),
            observation("PM10", 20, "Good", 1),
        ]))
        .unwrap();

        let fetch = parse_observations("CA", &observations, geo::lookup("CA"));
        assert_eq!(fetch.pollutants.ozone.as_ref().map(|r| r.aqi), Some(61));
        assert_eq!(fetch.pollutants.no2.as_ref().map(|r| r.aqi), Some(12));
        assert_eq!(fetch.pollutants.pm10.as_ref().map(|r| r.aqi), Some(20));
        assert!(fetch.pollutants.pm25.is_none());
    }

    #[test]
    fn test_parse_skips_matching_rows_without_aqi() {
        let observations: Vec<AirNowObservation> = serde_json::from_value(json!([
            {"ParameterName": "PM10", "AQI": null, "Category": {"Number": 1, "Name": "Good"}},
            observation("PM10", 33, "Good", 1),
        ]))
        .unwrap();

        let fetch = parse_observations("CA", &observations, geo::lookup("CA"));
        assert_eq!(fetch.pollutants.pm10.as_ref().map(|r| r.aqi), Some(33));
    }

    #[test]
    fn test_parse_falls_back_for_missing_coordinates_and_area() {
        let observations: Vec<AirNowObservation> = serde_json::from_value(json!([{
            "ParameterName": "PM2.5",
            "AQI": -1,
            "Latitude": 0.0,
            "Category": {"Number": 1, "Name": "Good"}
        }]))
        .unwrap();

        let fallback = geo::lookup("WA");
        let fetch = parse_observations("WA", &observations, fallback);
        assert_eq!(fetch.latitude, fallback.latitude);
        assert_eq!(fetch.longitude, fallback.longitude);
        assert_eq!(fetch.reporting_area, "WA");
        assert_eq!(fetch.pollutants.pm25.as_ref().map(|r| r.aqi), Some(0));
        assert!(fetch.date_observed.is_none());
    }
}
