//! Pool Service Module
//!
//! Orchestrates attempt reservation, cache lookup, dedup-forced regeneration
//! and upstream generation behind one entry point. Constructed explicitly at
//! bootstrap and passed by handle; there is no global instance.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::attempts::{AttemptStats, AttemptTracker};
use crate::config::Config;
use crate::error::Result;
use crate::pool::{PoolConfig, PoolKey, PoolStore, PoolUsage, QuestionRef};
use crate::source::QuestionSource;

// == Constants ==
/// Number of pools reported in `most_used_pools`.
const MOST_USED_LIMIT: usize = 10;

// == Dedup Policy ==
/// How a cache hit on a pool version the user has already consumed is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Treat the hit as a miss and regenerate under a new version, so a
    /// retaking learner is never shown an identical pool twice.
    #[default]
    ForceMiss,
    /// Serve the cached pool even when the user has seen it.
    ServeRepeat,
}

impl DedupPolicy {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            DedupPolicy::ForceMiss => "force-miss",
            DedupPolicy::ServeRepeat => "serve-repeat",
        }
    }
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "force-miss" => Ok(DedupPolicy::ForceMiss),
            "serve-repeat" => Ok(DedupPolicy::ServeRepeat),
            other => Err(format!("unknown dedup policy '{}'", other)),
        }
    }
}

// == Attempt Context ==
/// Quota scope for an exam-taking request. Omitted for non-exam contexts
/// such as cache warmup.
#[derive(Debug, Clone)]
pub struct AttemptContext {
    pub user_id: String,
    pub exam_id: String,
}

// == Pool Grant ==
/// A served pool.
#[derive(Debug, Clone)]
pub struct PoolGrant {
    /// Canonical key encoding of the pool configuration
    pub key: String,
    /// Version of the served pool
    pub version: u64,
    /// Ordered question references
    pub questions: Vec<QuestionRef>,
    /// Attempts left after this call; None without user context
    pub remaining_attempts: Option<u32>,
}

// == Cache Stats View ==
/// Aggregate view returned by `cache_stats`. Derived on demand, not stored.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsView {
    pub total_pools: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
    pub eviction_count: u64,
    pub expiration_count: u64,
    pub memory_usage_bytes: usize,
    pub most_used_pools: Vec<PoolUsage>,
    pub attempt_stats: AttemptOverview,
}

/// Aggregate attempt figures included in the cache stats view.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptOverview {
    pub tracked_pairs: usize,
    pub total_attempts: u64,
}

// == Pool Service ==
/// The question-pool cache engine's public surface.
pub struct PoolService {
    store: Arc<RwLock<PoolStore>>,
    attempts: Arc<RwLock<AttemptTracker>>,
    source: Arc<dyn QuestionSource>,
    dedup: DedupPolicy,
}

impl PoolService {
    // == Constructor ==
    /// Creates a service over explicit components.
    pub fn new(
        store: PoolStore,
        attempts: AttemptTracker,
        source: Arc<dyn QuestionSource>,
        dedup: DedupPolicy,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            attempts: Arc::new(RwLock::new(attempts)),
            source,
            dedup,
        }
    }

    /// Creates a service from configuration plus an injected source.
    pub fn from_config(config: &Config, source: Arc<dyn QuestionSource>) -> Self {
        let store = PoolStore::new(config.max_pools, config.pool_ttl, config.eviction_policy);
        let attempts = AttemptTracker::new(config.max_attempts);
        Self::new(store, attempts, source, config.dedup_policy)
    }

    /// Shared handle to the store, used by the background expiry sweep.
    pub fn store(&self) -> Arc<RwLock<PoolStore>> {
        Arc::clone(&self.store)
    }

    // == Get Question Pool ==
    /// Fetches a cached pool or generates a fresh one.
    ///
    /// With user context the call first consumes one attempt; an exhausted
    /// user fails before the store is touched. A cache hit whose version the
    /// user already consumed is treated as a miss under `ForceMiss`, forcing
    /// a new version. Generation failures propagate without refunding the
    /// reserved attempt: the attempt was committed before generation began.
    ///
    /// Generation runs outside the store lock, so concurrent cold callers
    /// may each generate; the last `put` wins. This stampede is accepted.
    pub async fn get_question_pool(
        &self,
        config: &PoolConfig,
        attempt: Option<&AttemptContext>,
    ) -> Result<PoolGrant> {
        config.validate()?;
        let key = PoolKey::from_config(config);

        let remaining = match attempt {
            Some(ctx) => Some(
                self.attempts
                    .write()
                    .await
                    .check_and_reserve(&ctx.user_id, &ctx.exam_id)?,
            ),
            None => None,
        };

        {
            let mut store = self.store.write().await;

            let repeat = match (store.live_version(&key), attempt) {
                (Some(version), Some(ctx)) if self.dedup == DedupPolicy::ForceMiss => {
                    self.attempts
                        .read()
                        .await
                        .has_seen(&ctx.user_id, &ctx.exam_id, &key.encode(), version)
                }
                _ => false,
            };

            if repeat {
                store.record_forced_miss(&key);
                debug!(key = %key, "live version already consumed, regenerating");
            } else if let Some(entry) = store.touch(&key) {
                let grant = PoolGrant {
                    key: key.encode(),
                    version: entry.version,
                    questions: entry.questions.clone(),
                    remaining_attempts: remaining,
                };
                drop(store);
                self.note_usage(attempt, &grant).await;
                return Ok(grant);
            }
            // miss recorded; fall through to generation
        }

        let questions = self.source.generate_pool(config).await?;

        let mut store = self.store.write().await;
        let entry = store.put(key.clone(), questions)?;
        let grant = PoolGrant {
            key: key.encode(),
            version: entry.version,
            questions: entry.questions.clone(),
            remaining_attempts: remaining,
        };
        drop(store);

        self.note_usage(attempt, &grant).await;
        Ok(grant)
    }

    /// Records the served (key, version) against the user's history.
    async fn note_usage(&self, attempt: Option<&AttemptContext>, grant: &PoolGrant) {
        if let Some(ctx) = attempt {
            self.attempts.write().await.record_pool_usage(
                &ctx.user_id,
                &ctx.exam_id,
                &grant.key,
                grant.version,
            );
        }
    }

    // == User Attempt Stats ==
    /// Attempt view for one (user, exam) pair; zeroed if unknown.
    pub async fn user_attempt_stats(&self, user_id: &str, exam_id: &str) -> AttemptStats {
        self.attempts.read().await.stats(user_id, exam_id)
    }

    // == Cache Stats ==
    /// Aggregate cache statistics.
    pub async fn cache_stats(&self) -> CacheStatsView {
        let store = self.store.read().await;
        let attempts = self.attempts.read().await;
        let stats = store.stats();

        CacheStatsView {
            total_pools: store.len(),
            hit_count: stats.hits(),
            miss_count: stats.misses(),
            hit_rate: stats.hit_rate(),
            eviction_count: stats.evictions(),
            expiration_count: stats.expirations(),
            memory_usage_bytes: store.memory_usage(),
            most_used_pools: stats.most_used(MOST_USED_LIMIT),
            attempt_stats: AttemptOverview {
                tracked_pairs: attempts.tracked_pairs(),
                total_attempts: attempts.total_attempts(),
            },
        }
    }

    // == Clear Cache ==
    /// Drops every cached pool. Returns the number removed.
    pub async fn clear_cache(&self) -> usize {
        self.store.write().await.invalidate_all()
    }

    // == Clear Cache By Category ==
    /// Drops every pool whose key includes `category`. Returns the number
    /// removed.
    pub async fn clear_cache_by_category(&self, category: &str) -> usize {
        self.store.write().await.invalidate_by_category(category)
    }
}
