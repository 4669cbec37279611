//! Clients for the third-party data providers
//!
//! - `airnow`: pollutant observations by postal code
//! - `open_meteo`: current weather by coordinates
//! - `pexels`: stock photo search
//!
//! Every client takes an injected `reqwest::Client` and a base URL so it
//! can be pointed at a mock server.

pub mod airnow;
pub mod open_meteo;
pub mod pexels;

use std::time::Duration;

use reqwest::Client;

pub use airnow::{AirNowClient, PollutantFetch, PollutantOutcome};
pub use open_meteo::OpenMeteoClient;
pub use pexels::{PexelsClient, PexelsPhoto};

const USER_AGENT: &str = concat!("Statewatch/", env!("CARGO_PKG_VERSION"));

/// Shared outbound HTTP client. No global timeout: the pollutant call sets
/// its own deadline and the other calls rely on connection defaults.
pub fn http_client() -> crate::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| crate::StatewatchError::general(format!("Failed to create HTTP client: {e}")))
}
