//! Question Source Module
//!
//! The upstream contract the cache generates pools from, plus an in-memory
//! implementation used by the standalone server and the test suite.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};
use crate::pool::{Difficulty, PoolConfig, QuestionRef};

// == Question Source Trait ==
/// Upstream provider of randomized question pools.
///
/// Implementations typically read an external store and may block on I/O.
/// The cache never retries this call; failures propagate to the caller.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Returns exactly `config.total_questions` randomized question
    /// references, or `PoolError::PoolGeneration` when the inventory cannot
    /// satisfy the request.
    async fn generate_pool(&self, config: &PoolConfig) -> Result<Vec<QuestionRef>>;
}

// == Bank Question ==
/// One authored question in the in-memory bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuestion {
    pub id: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

// == In-Memory Question Source ==
/// Question bank held in memory; filters and shuffles per request.
///
/// Production deployments inject their own `QuestionSource` backed by the
/// real question store; this one keeps the binary self-contained.
#[derive(Debug, Default)]
pub struct InMemoryQuestionSource {
    questions: Vec<BankQuestion>,
}

impl InMemoryQuestionSource {
    // == Constructor ==
    /// Creates a source over the given bank.
    pub fn new(questions: Vec<BankQuestion>) -> Self {
        Self { questions }
    }

    // == From JSON File ==
    /// Loads a bank from a JSON array of questions.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading question bank {}", path.display()))?;
        let questions: Vec<BankQuestion> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing question bank {}", path.display()))?;
        Ok(Self::new(questions))
    }

    // == Demo Bank ==
    /// Small built-in bank so the server runs without external data:
    /// 40 questions per (category, difficulty) across three categories.
    pub fn demo_bank() -> Self {
        let mut questions = Vec::new();
        for category in ["math", "science", "history"] {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                for i in 0..40 {
                    questions.push(BankQuestion {
                        id: format!("{}-{}-{:03}", category, difficulty.as_str(), i),
                        category: category.to_string(),
                        difficulty,
                        tags: vec![format!("topic-{}", i % 4)],
                    });
                }
            }
        }
        Self::new(questions)
    }

    /// Number of questions in the bank.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the bank is empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn matches(question: &BankQuestion, config: &PoolConfig) -> bool {
        let category_ok = config
            .categories
            .iter()
            .any(|c| c == &question.category);
        let difficulty_ok = config.difficulty == Difficulty::Mixed
            || question.difficulty == config.difficulty;
        let tags_ok = config.tags.is_empty()
            || config.tags.iter().any(|t| question.tags.contains(t));

        category_ok && difficulty_ok && tags_ok
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn generate_pool(&self, config: &PoolConfig) -> Result<Vec<QuestionRef>> {
        let mut matching: Vec<&BankQuestion> = self
            .questions
            .iter()
            .filter(|q| Self::matches(q, config))
            .collect();

        if matching.len() < config.total_questions {
            return Err(PoolError::PoolGeneration(format!(
                "requested {} questions, only {} match the filters",
                config.total_questions,
                matching.len()
            )));
        }

        matching.shuffle(&mut rand::thread_rng());

        Ok(matching
            .into_iter()
            .take(config.total_questions)
            .map(|q| QuestionRef {
                id: q.id.clone(),
                category: q.category.clone(),
                difficulty: q.difficulty,
            })
            .collect())
    }
}
