//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jug_core::SolveError;
use serde::{Deserialize, Serialize};

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The query string is missing a parameter or holds an invalid value.
    #[error("{0}")]
    InvalidRequest(String),

    /// The solver rejected the capacities and target.
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// The request could not be served for reasons unrelated to its input.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status the error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::Solve(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short summary shown to clients alongside the full description.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::Solve(_) => "invalid parameters",
            GatewayError::Internal(_) => "internal error",
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub description: String,
}

impl From<&GatewayError> for ApiError {
    fn from(err: &GatewayError) -> Self {
        Self {
            message: err.message().to_owned(),
            description: err.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::Internal(reason) = &self {
            tracing::error!(%reason, "request failed");
        }
        (self.status(), Json(ApiError::from(&self))).into_response()
    }
}
