//! API error responses
//!
//! Errors are rendered as `{"error": "..."}`. Upstream detail is logged by
//! the advisor and never echoed to the client.

use advisor::AdvisorError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body or invalid values
    #[error("{0}")]
    BadRequest(String),

    /// AI service unavailable or failing
    #[error("{0}")]
    Upstream(&'static str),
}

impl ApiError {
    /// Map an advisor failure, using `generic` as the client-facing
    /// message for anything that is not the caller's fault.
    pub fn from_advisor(error: AdvisorError, generic: &'static str) -> Self {
        match error {
            AdvisorError::InvalidInput(message) => ApiError::BadRequest(message),
            AdvisorError::NotConfigured => ApiError::Upstream("AI service is not configured"),
            AdvisorError::Upstream(_) | AdvisorError::Client(_) => ApiError::Upstream(generic),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
