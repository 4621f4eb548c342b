//! Pool Cache Module
//!
//! The core engine: canonical pool keys, versioned entries, a bounded store
//! with TTL expiry and policy-driven eviction, and best-effort statistics.

mod entry;
mod eviction;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, PoolEntry, QuestionRef};
pub use eviction::EvictionPolicy;
pub use key::{Difficulty, PoolConfig, PoolKey};
pub use stats::{PoolUsage, StatsCollector, AVERAGE_REF_SIZE};
pub use store::PoolStore;

// == Public Constants ==
/// Maximum questions a single pool request may ask for
pub const MAX_POOL_QUESTIONS: usize = 500;

/// Maximum categories a single pool request may combine
pub const MAX_POOL_CATEGORIES: usize = 32;
