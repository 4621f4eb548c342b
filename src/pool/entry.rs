//! Pool Entry Module
//!
//! Defines versioned cache entries and the question references they hold.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::pool::Difficulty;

// == Question Ref ==
/// Reference to a question owned by the upstream source.
///
/// The cache holds these by reference only; the underlying question record
/// (text, options, answer) stays with the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRef {
    /// Opaque question identifier
    pub id: String,
    /// Category the question belongs to
    pub category: String,
    /// Authored difficulty
    pub difficulty: Difficulty,
}

// == Pool Entry ==
/// A cached, versioned question pool.
#[derive(Debug, Clone)]
pub struct PoolEntry {
    /// Generation counter for this key, strictly increasing, starts at 1
    pub version: u64,
    /// Ordered question references served to callers
    pub questions: Vec<QuestionRef>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Times this entry was served from cache
    pub usage_count: u64,
    /// Last serve timestamp (Unix milliseconds)
    pub last_used_at: u64,
}

impl PoolEntry {
    // == Constructor ==
    /// Creates a new pool entry under the given version.
    ///
    /// # Arguments
    /// * `version` - Generation counter assigned by the store
    /// * `questions` - Freshly generated question references
    /// * `ttl_seconds` - Lifetime before the entry goes stale
    pub fn new(version: u64, questions: Vec<QuestionRef>, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            version,
            questions,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
            usage_count: 0,
            last_used_at: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Mark Used ==
    /// Records one cache hit against this entry.
    pub fn mark_used(&mut self) {
        self.usage_count += 1;
        self.last_used_at = current_timestamp_ms();
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        let now = current_timestamp_ms();
        self.expires_at.saturating_sub(now)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn refs(n: usize) -> Vec<QuestionRef> {
        (0..n)
            .map(|i| QuestionRef {
                id: format!("q{}", i),
                category: "math".to_string(),
                difficulty: Difficulty::Easy,
            })
            .collect()
    }

    #[test]
    fn test_entry_creation() {
        let entry = PoolEntry::new(1, refs(3), 60);

        assert_eq!(entry.version, 1);
        assert_eq!(entry.questions.len(), 3);
        assert_eq!(entry.usage_count, 0);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = PoolEntry::new(1, refs(1), 1);

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(1100));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_mark_used_bumps_counters() {
        let mut entry = PoolEntry::new(1, refs(1), 60);
        let created = entry.last_used_at;

        entry.mark_used();
        entry.mark_used();

        assert_eq!(entry.usage_count, 2);
        assert!(entry.last_used_at >= created);
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = PoolEntry::new(1, refs(1), 10);

        let remaining = entry.ttl_remaining_ms();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = PoolEntry::new(1, refs(1), 1);

        sleep(Duration::from_millis(1100));
        assert_eq!(entry.ttl_remaining_ms(), 0);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = PoolEntry {
            version: 1,
            questions: refs(1),
            created_at: now,
            expires_at: now, // expires exactly at creation time
            usage_count: 0,
            last_used_at: now,
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
