//! Request DTOs for the pool cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::error::{PoolError, Result};
use crate::pool::{Difficulty, PoolConfig};
use crate::service::AttemptContext;

/// Request body for the pool fetch operation (POST /pool)
///
/// `user_id` and `exam_id` enable quota and dedup tracking; both are omitted
/// for non-exam contexts such as cache warmup.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolRequest {
    /// Categories to draw questions from
    pub categories: Vec<String>,
    /// Requested difficulty
    pub difficulty: Difficulty,
    /// Optional topic tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Number of questions the pool must contain
    pub total_questions: usize,
    /// Requesting user, for attempt tracking
    #[serde(default)]
    pub user_id: Option<String>,
    /// Exam being attempted
    #[serde(default)]
    pub exam_id: Option<String>,
}

impl PoolRequest {
    /// Splits the request into engine inputs.
    ///
    /// `user_id` and `exam_id` must come together; full config validation
    /// happens inside the engine.
    pub fn into_parts(self) -> Result<(PoolConfig, Option<AttemptContext>)> {
        let attempt = match (self.user_id, self.exam_id) {
            (Some(user_id), Some(exam_id)) => Some(AttemptContext { user_id, exam_id }),
            (None, None) => None,
            _ => {
                return Err(PoolError::InvalidPoolConfig(
                    "user_id and exam_id must be provided together".to_string(),
                ))
            }
        };

        let config = PoolConfig {
            categories: self.categories,
            difficulty: self.difficulty,
            tags: self.tags,
            total_questions: self.total_questions,
        };

        Ok((config, attempt))
    }
}
