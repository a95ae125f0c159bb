use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::version::error::VersionError;

/// Errors returned to HTTP clients as `{"error": "<message>"}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid {field} name: {value:?}")]
    InvalidName { field: &'static str, value: String },

    #[error("failed to get versions: {0}")]
    Versions(#[source] VersionError),

    #[error("failed to get latest version: {0}")]
    LatestVersion(#[source] VersionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidName { .. } => StatusCode::BAD_REQUEST,
            ApiError::Versions(_) | ApiError::LatestVersion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
