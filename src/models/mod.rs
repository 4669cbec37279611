//! Data models for the Statewatch service
//!
//! This module contains the core domain models organized by concern:
//! - State: the static catalogue of U.S. states
//! - Air quality: pollutant readings and the per-query record
//! - Weather: current-conditions snapshot
//! - Photo: the photo set returned for a state

pub mod air_quality;
pub mod photo;
pub mod state;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::{AirQualityRecord, Observation, PollutantKind, PollutantReading, Pollutants};
pub use photo::PhotoSet;
pub use state::{STATES, StateIdentity};
pub use weather::WeatherSnapshot;
