//! Eviction Policy Module
//!
//! Chooses which pool to drop when the store is at capacity.

use std::str::FromStr;

use crate::pool::{PoolEntry, PoolKey};

// == Eviction Policy ==
/// Strategy for selecting the eviction victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Evict by ascending `(usage_count, last_used_at)`: frequently and
    /// recently served pools stay resident, ties fall to the stalest entry.
    #[default]
    HybridLfu,
    /// Evict the entry with the oldest `last_used_at`.
    Lru,
}

impl EvictionPolicy {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::HybridLfu => "hybrid",
            EvictionPolicy::Lru => "lru",
        }
    }

    // == Select Victim ==
    /// Picks the key to evict among live entries.
    ///
    /// Returns None only when the store is empty.
    pub fn select_victim<'a, I>(&self, entries: I) -> Option<PoolKey>
    where
        I: Iterator<Item = (&'a PoolKey, &'a PoolEntry)>,
    {
        match self {
            EvictionPolicy::HybridLfu => entries
                .min_by_key(|(_, entry)| (entry.usage_count, entry.last_used_at))
                .map(|(key, _)| key.clone()),
            EvictionPolicy::Lru => entries
                .min_by_key(|(_, entry)| entry.last_used_at)
                .map(|(key, _)| key.clone()),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hybrid" | "hybrid-lfu" => Ok(EvictionPolicy::HybridLfu),
            "lru" => Ok(EvictionPolicy::Lru),
            other => Err(format!("unknown eviction policy '{}'", other)),
        }
    }
}
