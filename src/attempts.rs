//! Attempt Tracker Module
//!
//! Enforces per (user, exam) retake quotas and remembers which pool versions
//! each user has already been served. Attempts never decrement; clearing a
//! record is an administrative action outside this tracker.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{PoolError, Result};
use crate::pool::current_timestamp_ms;

// == Constants ==
/// Default retake quota per (user, exam) pair.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

// == Attempt Record ==
/// Bookkeeping for one (user, exam) pair, created lazily on first attempt.
#[derive(Debug, Clone, Default)]
struct AttemptRecord {
    attempt_count: u32,
    used_pool_versions: HashSet<(String, u64)>,
    last_attempt_at: u64,
}

// == Used Pool Version ==
/// One (key, version) pair a user has consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedPoolVersion {
    /// Canonical pool key encoding
    pub key: String,
    /// Pool version served
    pub version: u64,
}

// == Attempt Stats ==
/// Read-only view of one user's attempts at one exam.
///
/// Users with no record yet get a zeroed view, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptStats {
    pub attempt_count: u32,
    pub max_attempts: u32,
    pub remaining_attempts: u32,
    /// Unix milliseconds of the last attempt, None before the first
    pub last_attempt_at: Option<u64>,
    pub used_pool_versions: Vec<UsedPoolVersion>,
}

// == Attempt Tracker ==
/// Per (user, exam) quota and served-pool history.
#[derive(Debug)]
pub struct AttemptTracker {
    records: HashMap<(String, String), AttemptRecord>,
    max_attempts: u32,
}

impl AttemptTracker {
    // == Constructor ==
    /// Creates a tracker with the given quota.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            records: HashMap::new(),
            max_attempts,
        }
    }

    // == Check And Reserve ==
    /// Consumes one attempt for `(user_id, exam_id)`.
    ///
    /// Fails with `AttemptLimitExceeded` once the quota is exhausted,
    /// otherwise increments the count and returns the attempts left.
    pub fn check_and_reserve(&mut self, user_id: &str, exam_id: &str) -> Result<u32> {
        let record = self
            .records
            .entry((user_id.to_string(), exam_id.to_string()))
            .or_default();

        if record.attempt_count >= self.max_attempts {
            return Err(PoolError::AttemptLimitExceeded {
                user_id: user_id.to_string(),
                exam_id: exam_id.to_string(),
            });
        }

        record.attempt_count += 1;
        record.last_attempt_at = current_timestamp_ms();
        Ok(self.max_attempts - record.attempt_count)
    }

    // == Record Pool Usage ==
    /// Adds `(key, version)` to the user's consumed set. The set is
    /// append-only for the lifetime of the record.
    pub fn record_pool_usage(&mut self, user_id: &str, exam_id: &str, key: &str, version: u64) {
        let record = self
            .records
            .entry((user_id.to_string(), exam_id.to_string()))
            .or_default();
        record.used_pool_versions.insert((key.to_string(), version));
    }

    // == Has Seen ==
    /// Whether the user already consumed this exact pool version.
    pub fn has_seen(&self, user_id: &str, exam_id: &str, key: &str, version: u64) -> bool {
        self.records
            .get(&(user_id.to_string(), exam_id.to_string()))
            .map(|record| {
                record
                    .used_pool_versions
                    .contains(&(key.to_string(), version))
            })
            .unwrap_or(false)
    }

    // == Stats ==
    /// View of one user's attempts; zeroed when no record exists.
    pub fn stats(&self, user_id: &str, exam_id: &str) -> AttemptStats {
        match self.records.get(&(user_id.to_string(), exam_id.to_string())) {
            Some(record) => {
                let mut used: Vec<UsedPoolVersion> = record
                    .used_pool_versions
                    .iter()
                    .map(|(key, version)| UsedPoolVersion {
                        key: key.clone(),
                        version: *version,
                    })
                    .collect();
                used.sort_by(|a, b| a.key.cmp(&b.key).then(a.version.cmp(&b.version)));

                AttemptStats {
                    attempt_count: record.attempt_count,
                    max_attempts: self.max_attempts,
                    remaining_attempts: self.max_attempts.saturating_sub(record.attempt_count),
                    last_attempt_at: Some(record.last_attempt_at),
                    used_pool_versions: used,
                }
            }
            None => AttemptStats {
                attempt_count: 0,
                max_attempts: self.max_attempts,
                remaining_attempts: self.max_attempts,
                last_attempt_at: None,
                used_pool_versions: Vec::new(),
            },
        }
    }

    // == Aggregates ==
    /// Number of (user, exam) pairs with a record.
    pub fn tracked_pairs(&self) -> usize {
        self.records.len()
    }

    /// Total attempts consumed across all pairs.
    pub fn total_attempts(&self) -> u64 {
        self.records
            .values()
            .map(|record| record.attempt_count as u64)
            .sum()
    }

    /// Configured quota.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
