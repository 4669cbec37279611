//! Error types and handling for the `Statewatch` service

use thiserror::Error;

/// Main error type for the `Statewatch` service
#[derive(Error, Debug)]
pub enum StatewatchError {
    /// Configuration-related errors, including missing provider keys
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Upstream call exceeded its deadline
    #[error("Timed out: {message}")]
    Timeout { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl StatewatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StatewatchError::Config { message } => message.clone(),
            StatewatchError::Api { .. } => {
                "Unable to reach an upstream data provider. Please try again later.".to_string()
            }
            StatewatchError::Validation { message } => message.clone(),
            StatewatchError::Timeout { .. } => {
                "The upstream service is responding slowly. Please try again.".to_string()
            }
            StatewatchError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for StatewatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StatewatchError::timeout(err.to_string())
        } else {
            StatewatchError::api(err.to_string())
        }
    }
}
