use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::StatewatchError;

/// JSON error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message.into() }),
        }
    }

    /// Mark the body with `available: false` for the air-quality contract
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        if let Some(body) = self.body.as_object_mut() {
            body.insert("available".to_string(), Value::Bool(false));
        }
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<StatewatchError> for ApiError {
    fn from(err: StatewatchError) -> Self {
        let status = match err {
            StatewatchError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", err);
        }
        Self {
            status,
            body: json!({ "error": err.user_message() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
