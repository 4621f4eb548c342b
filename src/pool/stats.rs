//! Stats Collector Module
//!
//! Tracks hit/miss/eviction counters and per-key usage. Updates are
//! best-effort bookkeeping; nothing here can fail the primary operation.

use std::collections::HashMap;

use serde::Serialize;

// == Constants ==
/// Approximate in-memory footprint of one question reference, used for
/// memory accounting.
pub const AVERAGE_REF_SIZE: usize = 96;

// == Pool Usage ==
/// Usage figure for one pool key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolUsage {
    /// Canonical key encoding
    pub key: String,
    /// Requests observed for this key
    pub count: u64,
}

// == Stats Collector ==
/// Cache performance counters.
///
/// Per-key usage survives eviction and expiry so `most_used` reflects demand,
/// not just what happens to be resident.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
    usage_by_key: HashMap<String, u64>,
}

impl StatsCollector {
    // == Constructor ==
    /// Creates a new collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Counts a cache hit for `key`.
    pub fn record_hit(&mut self, key: &str) {
        self.hits += 1;
        self.bump_usage(key);
    }

    // == Record Miss ==
    /// Counts a cache miss for `key`. Forced misses taken for attempt
    /// deduplication are recorded through the same counter.
    pub fn record_miss(&mut self, key: &str) {
        self.misses += 1;
        self.bump_usage(key);
    }

    // == Record Eviction ==
    /// Counts one capacity eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expiration ==
    /// Counts one TTL expiry drop.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    fn bump_usage(&mut self, key: &str) {
        *self.usage_by_key.entry(key.to_string()).or_insert(0) += 1;
    }

    // == Accessors ==
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    pub fn expirations(&self) -> u64 {
        self.expirations
    }

    /// Requests observed for one key.
    pub fn usage_of(&self, key: &str) -> u64 {
        self.usage_by_key.get(key).copied().unwrap_or(0)
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Most Used ==
    /// Top `n` keys by request count, descending. Ties order by key so the
    /// result is deterministic.
    pub fn most_used(&self, n: usize) -> Vec<PoolUsage> {
        let mut usage: Vec<PoolUsage> = self
            .usage_by_key
            .iter()
            .map(|(key, count)| PoolUsage {
                key: key.clone(),
                count: *count,
            })
            .collect();

        usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        usage.truncate(n);
        usage
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StatsCollector::new();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.expirations(), 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = StatsCollector::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = StatsCollector::new();
        stats.record_hit("k1");
        stats.record_miss("k1");
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_usage_counts_hits_and_misses() {
        let mut stats = StatsCollector::new();
        stats.record_miss("k1");
        stats.record_hit("k1");
        stats.record_hit("k1");

        assert_eq!(stats.usage_of("k1"), 3);
        assert_eq!(stats.usage_of("unknown"), 0);
    }

    #[test]
    fn test_most_used_ordering() {
        let mut stats = StatsCollector::new();
        stats.record_hit("cold");
        for _ in 0..3 {
            stats.record_hit("hot");
        }
        for _ in 0..2 {
            stats.record_hit("warm");
        }

        let top = stats.most_used(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "hot");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].key, "warm");
    }

    #[test]
    fn test_most_used_ties_deterministic() {
        let mut stats = StatsCollector::new();
        stats.record_hit("b");
        stats.record_hit("a");

        let top = stats.most_used(10);
        assert_eq!(top[0].key, "a");
        assert_eq!(top[1].key, "b");
    }

    #[test]
    fn test_record_eviction_and_expiration() {
        let mut stats = StatsCollector::new();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_expiration();

        assert_eq!(stats.evictions(), 2);
        assert_eq!(stats.expirations(), 1);
    }
}
