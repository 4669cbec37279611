//! `Statewatch` - per-state air quality, weather and photos
//!
//! This library provides the provider clients, aggregation and
//! classification logic, and the HTTP surface behind the state map.

pub mod aggregate;
pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod gather;
pub mod geo;
pub mod logging;
pub mod models;
pub mod photos;
pub mod providers;
pub mod web;

// Re-export core types for public API
pub use aggregate::{AirQualityService, AqiOverview};
pub use classify::AqiCategory;
pub use config::StatewatchConfig;
pub use error::StatewatchError;
pub use models::{AirQualityRecord, PhotoSet, PollutantReading, StateIdentity, WeatherSnapshot};
pub use photos::PhotoService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, StatewatchError>;
