//! Pool Cache - a question-pool cache engine for exam platforms
//!
//! Serves randomized question pools keyed by (categories, difficulty, tags,
//! size), bounds memory via eviction, and keeps a retaking learner from
//! seeing the same generated pool twice within a bounded attempt quota.

pub mod api;
pub mod attempts;
pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod service;
pub mod source;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{PoolError, Result};
pub use service::{AttemptContext, DedupPolicy, PoolGrant, PoolService};
pub use source::{InMemoryQuestionSource, QuestionSource};
pub use tasks::spawn_cleanup_task;
