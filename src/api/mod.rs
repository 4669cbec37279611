use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AirQualityService, AqiOverview};
use crate::config::StatewatchConfig;
use crate::models::{AirQualityRecord, PhotoSet, STATES, StateIdentity, state::normalize_code};
use crate::photos::PhotoService;
use crate::providers::{self, AirNowClient, OpenMeteoClient, PexelsClient};

pub mod error;

pub use error::ApiError;

/// Shared services behind the HTTP handlers
pub struct AppState {
    pub air_quality: AirQualityService,
    pub photos: PhotoService,
    pub overview_states: Vec<String>,
}

impl AppState {
    pub fn from_config(config: &StatewatchConfig) -> crate::Result<Self> {
        let client = providers::http_client()?;
        Ok(Self {
            air_quality: AirQualityService::new(
                AirNowClient::new(client.clone(), &config.air_now),
                OpenMeteoClient::new(client.clone(), &config.weather),
                &config.air_now,
            ),
            photos: PhotoService::new(PexelsClient::new(client, &config.photos), &config.photos),
            overview_states: config.overview.states.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityRequest {
    #[serde(default)]
    pub state_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRequest {
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    /// Comma-separated state codes; defaults to the configured list
    pub states: Option<String>,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/air-quality", post(post_air_quality))
        .route("/state-photos", post(post_state_photos))
        .route("/overview", get(get_overview))
        .route("/states", get(get_states))
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

async fn post_air_quality(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AirQualityRequest>, JsonRejection>,
) -> Result<Json<AirQualityRecord>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let state_code = required(request.state_code)
        .map(|code| normalize_code(&code))
        .ok_or_else(|| ApiError::bad_request("State code is required"))?;

    let record = state
        .air_quality
        .air_quality(&state_code)
        .await
        .map_err(|e| ApiError::from(e).unavailable())?;
    Ok(Json(record))
}

async fn post_state_photos(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PhotoRequest>, JsonRejection>,
) -> Result<Json<PhotoSet>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let state_name = required(request.state_name)
        .ok_or_else(|| ApiError::bad_request("State name is required"))?;
    let state_code = required(request.state_code);

    let photos = state
        .photos
        .photos_for(&state_name, state_code.as_deref())
        .await?;
    Ok(Json(photos))
}

async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<AqiOverview>, ApiError> {
    let states: Vec<String> = match query.states {
        Some(list) => list
            .split(',')
            .map(normalize_code)
            .filter(|code| !code.is_empty())
            .collect(),
        None => state.overview_states.clone(),
    };
    if states.is_empty() {
        return Err(ApiError::bad_request("At least one state code is required"));
    }

    let overview = state.air_quality.overview(&states).await?;
    Ok(Json(overview))
}

async fn get_states() -> Json<&'static [StateIdentity]> {
    Json(&STATES[..])
}

pub async fn get_health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: crate::VERSION,
    })
}
