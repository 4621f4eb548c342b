//! Error types for the pool cache engine
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Pool Error Enum ==
/// Unified error type for the pool cache engine.
///
/// The three caller-facing variants are deliberately distinct so callers
/// branch on the variant instead of matching message strings.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Caller supplied an unusable pool configuration
    #[error("invalid pool config: {0}")]
    InvalidPoolConfig(String),

    /// Retake quota exhausted for this (user, exam) pair
    #[error("attempt limit reached for user '{user_id}' on exam '{exam_id}'")]
    AttemptLimitExceeded { user_id: String, exam_id: String },

    /// Upstream question source could not produce the requested pool
    #[error("pool generation failed: {0}")]
    PoolGeneration(String),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for PoolError {
    fn into_response(self) -> Response {
        let status = match &self {
            PoolError::InvalidPoolConfig(_) => StatusCode::BAD_REQUEST,
            PoolError::AttemptLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            PoolError::PoolGeneration(_) => StatusCode::SERVICE_UNAVAILABLE,
            PoolError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the pool cache engine.
pub type Result<T> = std::result::Result<T, PoolError>;
