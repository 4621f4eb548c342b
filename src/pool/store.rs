//! Pool Store Module
//!
//! Bounded key→entry cache: lazy TTL expiry on access, capacity eviction
//! driven by the configured policy, and per-key versions that keep climbing
//! even after an entry has been evicted or expired.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{PoolError, Result};
use crate::pool::{
    EvictionPolicy, PoolEntry, PoolKey, QuestionRef, StatsCollector, AVERAGE_REF_SIZE,
};

// == Pool Store ==
/// Bounded cache of generated question pools.
#[derive(Debug)]
pub struct PoolStore {
    /// Key → live entry
    entries: HashMap<PoolKey, PoolEntry>,
    /// Last version handed out per key; survives eviction and expiry so
    /// versions stay strictly increasing
    versions: HashMap<PoolKey, u64>,
    /// Best-effort performance counters
    stats: StatsCollector,
    /// Maximum number of pools kept resident
    max_pools: usize,
    /// Pool lifetime in seconds
    ttl_seconds: u64,
    /// Victim selection at capacity
    policy: EvictionPolicy,
}

impl PoolStore {
    // == Constructor ==
    /// Creates a new PoolStore.
    ///
    /// # Arguments
    /// * `max_pools` - Maximum number of pools the store can hold
    /// * `ttl_seconds` - Lifetime of a cached pool
    /// * `policy` - Eviction strategy at capacity
    pub fn new(max_pools: usize, ttl_seconds: u64, policy: EvictionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            versions: HashMap::new(),
            stats: StatsCollector::new(),
            max_pools,
            ttl_seconds,
            policy,
        }
    }

    // == Live Version ==
    /// Version of the live entry for `key`, if any.
    ///
    /// Performs the lazy TTL check but records no hit or miss; the caller
    /// uses this to decide whether the live version must be regenerated.
    pub fn live_version(&mut self, key: &PoolKey) -> Option<u64> {
        self.expire_if_stale(key);
        self.entries.get(key).map(|entry| entry.version)
    }

    // == Touch ==
    /// Cache lookup that records the outcome.
    ///
    /// On a live entry: bumps `usage_count`/`last_used_at`, records a hit and
    /// returns the entry. Otherwise records a miss and returns None. Expired
    /// entries are dropped before the lookup.
    pub fn touch(&mut self, key: &PoolKey) -> Option<&PoolEntry> {
        self.expire_if_stale(key);

        if let Some(entry) = self.entries.get_mut(key) {
            entry.mark_used();
            self.stats.record_hit(&key.encode());
            self.entries.get(key)
        } else {
            self.stats.record_miss(&key.encode());
            None
        }
    }

    // == Record Forced Miss ==
    /// Counts the miss taken when a live entry is bypassed because the
    /// requesting user already consumed its version.
    pub fn record_forced_miss(&mut self, key: &PoolKey) {
        self.stats.record_miss(&key.encode());
    }

    // == Put ==
    /// Inserts a freshly generated pool under the next version for `key`.
    ///
    /// Replaces any live entry for the same key. When inserting a new key
    /// would exceed capacity, one victim chosen by the eviction policy is
    /// dropped first.
    pub fn put(&mut self, key: PoolKey, questions: Vec<QuestionRef>) -> Result<&PoolEntry> {
        let is_replace = self.entries.contains_key(&key);

        if !is_replace && self.entries.len() >= self.max_pools {
            match self.policy.select_victim(self.entries.iter()) {
                Some(victim) => {
                    self.entries.remove(&victim);
                    self.stats.record_eviction();
                    debug!(key = %victim, "evicted pool at capacity");
                }
                None => {
                    return Err(PoolError::Internal(
                        "store capacity is zero, nothing to evict".to_string(),
                    ));
                }
            }
        }

        let version = self.next_version(&key);
        let entry = PoolEntry::new(version, questions, self.ttl_seconds);
        self.entries.insert(key.clone(), entry);

        self.entries
            .get(&key)
            .ok_or_else(|| PoolError::Internal("freshly inserted pool vanished".to_string()))
    }

    /// Next version for `key`; first generation is version 1.
    fn next_version(&mut self, key: &PoolKey) -> u64 {
        let version = self.versions.entry(key.clone()).or_insert(0);
        *version += 1;
        *version
    }

    /// Drops the entry for `key` if its TTL elapsed.
    fn expire_if_stale(&mut self, key: &PoolKey) {
        let stale = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);

        if stale {
            self.entries.remove(key);
            self.stats.record_expiration();
            debug!(key = %key, "dropped expired pool");
        }
    }

    // == Invalidate By Category ==
    /// Removes every pool whose key's category set contains `category`.
    ///
    /// Returns the number of pools removed.
    pub fn invalidate_by_category(&mut self, category: &str) -> usize {
        let doomed: Vec<PoolKey> = self
            .entries
            .keys()
            .filter(|key| key.contains_category(category))
            .cloned()
            .collect();

        for key in &doomed {
            self.entries.remove(key);
        }

        doomed.len()
    }

    // == Invalidate All ==
    /// Clears the store. Version counters are kept so regenerated pools
    /// continue the per-key sequence.
    pub fn invalidate_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired pools.
    ///
    /// Returns the number of pools removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<PoolKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.stats.record_expiration();
        }

        expired.len()
    }

    // == Memory Usage ==
    /// Approximate bytes held by live pools.
    pub fn memory_usage(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.questions.len())
            .sum::<usize>()
            * AVERAGE_REF_SIZE
    }

    // == Stats ==
    /// Read access to the collector.
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    // == Length ==
    /// Returns the current number of live pools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no pools are resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
