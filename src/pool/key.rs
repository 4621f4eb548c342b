//! Pool Key Module
//!
//! Canonical cache keys derived from a pool configuration. Two configurations
//! that request the same categories, difficulty, tags and size map to the
//! same key no matter how their inputs were ordered.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};
use crate::pool::{MAX_POOL_CATEGORIES, MAX_POOL_QUESTIONS};

// == Difficulty ==
/// Question difficulty requested for a pool.
///
/// `Mixed` matches questions of any difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    /// Canonical wire spelling, used in key encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Mixed => "MIXED",
        }
    }
}

// == Pool Config ==
/// Requested shape of a question pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Categories to draw questions from (at least one required)
    pub categories: Vec<String>,
    /// Requested difficulty
    pub difficulty: Difficulty,
    /// Optional topic tags to narrow the draw
    #[serde(default)]
    pub tags: Vec<String>,
    /// Number of questions the pool must contain
    pub total_questions: usize,
}

impl PoolConfig {
    /// Validates the configuration.
    ///
    /// A config is unusable when it asks for zero questions, names no
    /// categories, or exceeds the engine's hard ceilings.
    pub fn validate(&self) -> Result<()> {
        if self.total_questions == 0 {
            return Err(PoolError::InvalidPoolConfig(
                "total_questions must be greater than zero".to_string(),
            ));
        }
        if self.total_questions > MAX_POOL_QUESTIONS {
            return Err(PoolError::InvalidPoolConfig(format!(
                "total_questions exceeds maximum of {}",
                MAX_POOL_QUESTIONS
            )));
        }
        if self.categories.is_empty() {
            return Err(PoolError::InvalidPoolConfig(
                "at least one category is required".to_string(),
            ));
        }
        if self.categories.len() > MAX_POOL_CATEGORIES {
            return Err(PoolError::InvalidPoolConfig(format!(
                "categories exceed maximum of {}",
                MAX_POOL_CATEGORIES
            )));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(PoolError::InvalidPoolConfig(
                "categories must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

// == Pool Key ==
/// Canonical identifier for a cached pool.
///
/// Categories and tags are sorted and deduplicated on construction, so the
/// key itself is usable directly as a hash-map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolKey {
    categories: Vec<String>,
    difficulty: Difficulty,
    tags: Vec<String>,
    total_questions: usize,
}

impl PoolKey {
    /// Builds the canonical key for a configuration.
    pub fn from_config(config: &PoolConfig) -> Self {
        let mut categories = config.categories.clone();
        categories.sort();
        categories.dedup();

        let mut tags = config.tags.clone();
        tags.sort();
        tags.dedup();

        Self {
            categories,
            difficulty: config.difficulty,
            tags,
            total_questions: config.total_questions,
        }
    }

    /// Whether this key's category set includes `category`.
    pub fn contains_category(&self, category: &str) -> bool {
        // categories are sorted after construction
        self.categories.binary_search_by(|c| c.as_str().cmp(category)).is_ok()
    }

    /// Canonical string encoding: `categories|difficulty|tags|size`.
    pub fn encode(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.categories.join(","),
            self.difficulty.as_str(),
            self.tags.join(","),
            self.total_questions
        )
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
