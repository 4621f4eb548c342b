//! Response DTOs for the pool cache API
//!
//! Defines the structure of outgoing HTTP response bodies. The cache stats
//! endpoint serializes `CacheStatsView` directly.

use serde::Serialize;

use crate::attempts::AttemptStats;
use crate::pool::QuestionRef;
use crate::service::PoolGrant;

/// Response body for the pool fetch operation (POST /pool)
#[derive(Debug, Clone, Serialize)]
pub struct PoolResponse {
    /// Canonical pool key
    pub key: String,
    /// Version of the served pool
    pub version: u64,
    /// Number of questions in the pool
    pub total_questions: usize,
    /// Attempts left for this user/exam, absent without user context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    /// Ordered question references
    pub questions: Vec<QuestionRef>,
}

impl PoolResponse {
    /// Creates a response from a served grant.
    pub fn new(grant: PoolGrant) -> Self {
        Self {
            key: grant.key,
            version: grant.version,
            total_questions: grant.questions.len(),
            remaining_attempts: grant.remaining_attempts,
            questions: grant.questions,
        }
    }
}

/// Response body for the attempt stats endpoint (GET /attempts/:user_id/:exam_id)
#[derive(Debug, Clone, Serialize)]
pub struct AttemptStatsResponse {
    pub user_id: String,
    pub exam_id: String,
    #[serde(flatten)]
    pub stats: AttemptStats,
}

impl AttemptStatsResponse {
    /// Creates a response for one (user, exam) pair.
    pub fn new(user_id: impl Into<String>, exam_id: impl Into<String>, stats: AttemptStats) -> Self {
        Self {
            user_id: user_id.into(),
            exam_id: exam_id.into(),
            stats,
        }
    }
}

/// Response body for the cache clear operations (DELETE /cache, DELETE /cache/category/:category)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of pools removed
    pub removed_pools: usize,
}

impl ClearResponse {
    /// Creates a response for a full cache clear.
    pub fn all(removed_pools: usize) -> Self {
        Self {
            message: format!("Cleared {} cached pools", removed_pools),
            removed_pools,
        }
    }

    /// Creates a response for a category invalidation.
    pub fn category(category: &str, removed_pools: usize) -> Self {
        Self {
            message: format!(
                "Cleared {} cached pools in category '{}'",
                removed_pools, category
            ),
            removed_pools,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
