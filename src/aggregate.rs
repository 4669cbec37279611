//! Air-quality aggregation
//!
//! Pollutant fetch first, then weather at the best known coordinates.
//! Provider-level failures arrive here as typed unavailable outcomes with
//! specific messages; anything else is caught here and turned into a
//! generic unavailable record.

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::classify::AqiCategory;
use crate::config::{AirNowConfig, resolve_api_key};
use crate::gather::{mean_rounded, settle_all};
use crate::models::{AirQualityRecord, Observation, PollutantKind};
use crate::providers::{AirNowClient, OpenMeteoClient, PollutantOutcome};
use crate::{Result, StatewatchError};

pub const GENERIC_UNAVAILABLE_MESSAGE: &str =
    "Air quality data could not be retrieved. Please try again later.";
pub const OVERVIEW_UNAVAILABLE_MESSAGE: &str = "Unable to load air quality data";

/// Builds [`AirQualityRecord`]s from the pollutant and weather providers
pub struct AirQualityService {
    air_now: AirNowClient,
    weather: OpenMeteoClient,
    api_key: Option<String>,
    api_key_env: String,
}

/// Averaged AQI across several states
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiOverview {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AqiCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm10: Option<u32>,
    pub sampled: Vec<String>,
    pub requested: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AirQualityService {
    #[must_use]
    pub fn new(air_now: AirNowClient, weather: OpenMeteoClient, config: &AirNowConfig) -> Self {
        Self {
            air_now,
            weather,
            api_key: config.api_key.clone(),
            api_key_env: config.api_key_env.clone(),
        }
    }

    /// Aggregate one state. Only a missing API key is returned as `Err`;
    /// every other failure becomes an unavailable record.
    #[instrument(skip(self))]
    pub async fn air_quality(&self, state_code: &str) -> Result<AirQualityRecord> {
        let api_key = resolve_api_key(self.api_key.as_deref(), &self.api_key_env, "AirNow")?;

        let fetch = match self.air_now.fetch(state_code, &api_key).await {
            Ok(PollutantOutcome::Available(fetch)) => fetch,
            Ok(PollutantOutcome::Unavailable(message)) => {
                return Ok(AirQualityRecord::unavailable(message));
            }
            Err(e) => {
                error!("Error in air quality aggregation for {}: {}", state_code, e);
                return Ok(AirQualityRecord::unavailable(GENERIC_UNAVAILABLE_MESSAGE));
            }
        };

        let weather = self.weather.current(fetch.latitude, fetch.longitude).await;

        Ok(AirQualityRecord::available(Observation::new(
            fetch.state_code,
            fetch.reporting_area,
            fetch.date_observed,
            fetch.hour_observed,
            fetch.pollutants,
            weather,
        )))
    }

    /// Concurrently aggregate `state_codes` and average the usable results
    pub async fn overview(&self, state_codes: &[String]) -> Result<AqiOverview> {
        // Surface a missing key once instead of as N dropped entries
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env, "AirNow")?;

        let records = settle_all(state_codes.iter().map(|code| async move {
            let record = self.air_quality(code).await?;
            if record.available {
                Ok((code.clone(), record))
            } else {
                Err(StatewatchError::api(format!(
                    "{code}: {}",
                    record.message().unwrap_or("unavailable")
                )))
            }
        }))
        .await;

        info!("Overview sampled {}/{} states", records.len(), state_codes.len());
        Ok(summarize(state_codes, &records))
    }
}

fn summarize(requested: &[String], records: &[(String, AirQualityRecord)]) -> AqiOverview {
    let sampled: Vec<String> = records.iter().map(|(code, _)| code.clone()).collect();
    let requested = requested.to_vec();

    if records.is_empty() {
        return AqiOverview {
            available: false,
            aqi: None,
            category: None,
            color: None,
            pm25: None,
            pm10: None,
            sampled,
            requested,
            message: Some(OVERVIEW_UNAVAILABLE_MESSAGE.to_string()),
        };
    }

    let pollutant_aqi = |record: &AirQualityRecord, kind: PollutantKind| {
        record
            .pollutants()
            .and_then(|p| p.get(kind))
            .map_or(0, |r| r.aqi)
    };

    let aqi = mean_rounded(records.iter().map(|(_, r)| {
        r.observation()
            .and_then(|o| o.headline_aqi)
            .unwrap_or(0)
    }));
    let category = aqi.map(AqiCategory::from_aqi);

    AqiOverview {
        available: true,
        aqi,
        category,
        color: category.map(AqiCategory::color),
        pm25: mean_rounded(records.iter().map(|(_, r)| pollutant_aqi(r, PollutantKind::Pm25))),
        pm10: mean_rounded(records.iter().map(|(_, r)| pollutant_aqi(r, PollutantKind::Pm10))),
        sampled,
        requested,
        message: None,
    }
}
