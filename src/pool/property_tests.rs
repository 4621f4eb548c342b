//! Property-Based Tests for the Pool Module
//!
//! Uses proptest to verify canonicalization, capacity, versioning and
//! statistics properties of the engine.

use proptest::prelude::*;

use crate::attempts::AttemptTracker;
use crate::pool::{
    Difficulty, EvictionPolicy, PoolConfig, PoolKey, PoolStore, QuestionRef,
};

// == Test Configuration ==
const TEST_MAX_POOLS: usize = 50;
const TEST_TTL: u64 = 300;

// == Strategies ==
/// Generates category/tag names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|s| s)
}

fn categories_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name_strategy(), 1..6)
}

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
        Just(Difficulty::Mixed),
    ]
}

fn refs(n: usize) -> Vec<QuestionRef> {
    (0..n)
        .map(|i| QuestionRef {
            id: format!("q{}", i),
            category: "math".to_string(),
            difficulty: Difficulty::Easy,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Configurations with the same categories/difficulty/tags/size in any
    // input order derive the same key.
    #[test]
    fn prop_key_canonicalization(
        categories in categories_strategy(),
        tags in prop::collection::vec(name_strategy(), 0..5),
        difficulty in difficulty_strategy(),
        total in 1usize..100
    ) {
        let forward = PoolConfig {
            categories: categories.clone(),
            difficulty,
            tags: tags.clone(),
            total_questions: total,
        };
        let mut reversed_categories = categories;
        reversed_categories.reverse();
        let mut reversed_tags = tags;
        reversed_tags.reverse();
        let backward = PoolConfig {
            categories: reversed_categories,
            difficulty,
            tags: reversed_tags,
            total_questions: total,
        };

        let a = PoolKey::from_config(&forward);
        let b = PoolKey::from_config(&backward);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.encode(), b.encode());
    }

    // The store never holds more than its configured capacity, whatever the
    // insert sequence.
    #[test]
    fn prop_capacity_enforcement(
        categories in prop::collection::vec(categories_strategy(), 1..120)
    ) {
        let max_pools = 10;
        let mut store = PoolStore::new(max_pools, TEST_TTL, EvictionPolicy::HybridLfu);

        for cats in categories {
            let key = PoolKey::from_config(&PoolConfig {
                categories: cats,
                difficulty: Difficulty::Easy,
                tags: vec![],
                total_questions: 5,
            });
            store.put(key, refs(5)).unwrap();
            prop_assert!(
                store.len() <= max_pools,
                "store size {} exceeds max {}",
                store.len(),
                max_pools
            );
        }
    }

    // Versions per key are strictly increasing, across replacement and
    // explicit invalidation.
    #[test]
    fn prop_version_monotonicity(
        clear_points in prop::collection::vec(any::<bool>(), 1..30)
    ) {
        let mut store = PoolStore::new(TEST_MAX_POOLS, TEST_TTL, EvictionPolicy::HybridLfu);
        let key = PoolKey::from_config(&PoolConfig {
            categories: vec!["math".to_string()],
            difficulty: Difficulty::Easy,
            tags: vec![],
            total_questions: 5,
        });

        let mut last_version = 0;
        for clear in clear_points {
            if clear {
                store.invalidate_all();
            }
            let version = store.put(key.clone(), refs(5)).unwrap().version;
            prop_assert!(
                version > last_version,
                "version {} did not increase past {}",
                version,
                last_version
            );
            last_version = version;
        }
    }

    // Reservations succeed exactly max_attempts times per (user, exam) pair
    // and the count never exceeds the quota.
    #[test]
    fn prop_attempt_quota(
        max_attempts in 1u32..20,
        requests in 1usize..60
    ) {
        let mut tracker = AttemptTracker::new(max_attempts);

        let mut successes = 0u32;
        for _ in 0..requests {
            if tracker.check_and_reserve("u1", "e1").is_ok() {
                successes += 1;
            }
        }

        let expected = (requests as u32).min(max_attempts);
        prop_assert_eq!(successes, expected);

        let stats = tracker.stats("u1", "e1");
        prop_assert!(stats.attempt_count <= max_attempts);
        prop_assert_eq!(
            stats.remaining_attempts,
            max_attempts - stats.attempt_count
        );
    }

    // Hit and miss counters reflect every lookup outcome, and hit_rate stays
    // consistent with them.
    #[test]
    fn prop_statistics_accuracy(
        ops in prop::collection::vec(
            (categories_strategy(), any::<bool>()),
            1..50
        )
    ) {
        let mut store = PoolStore::new(TEST_MAX_POOLS, TEST_TTL, EvictionPolicy::HybridLfu);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for (cats, insert) in ops {
            let key = PoolKey::from_config(&PoolConfig {
                categories: cats,
                difficulty: Difficulty::Easy,
                tags: vec![],
                total_questions: 3,
            });
            if insert {
                store.put(key, refs(3)).unwrap();
            } else {
                match store.touch(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits(), expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses(), expected_misses, "Misses mismatch");

        let total = expected_hits + expected_misses;
        if total == 0 {
            prop_assert_eq!(stats.hit_rate(), 0.0);
        } else {
            let expected_rate = expected_hits as f64 / total as f64;
            prop_assert!((stats.hit_rate() - expected_rate).abs() < 1e-9);
        }
    }

    // Category invalidation removes exactly the keys containing the
    // category and leaves all others resident.
    #[test]
    fn prop_category_invalidation(
        category_sets in prop::collection::vec(categories_strategy(), 1..20),
        target in name_strategy()
    ) {
        let mut store = PoolStore::new(1000, TEST_TTL, EvictionPolicy::HybridLfu);

        let mut keys = Vec::new();
        for cats in category_sets {
            let key = PoolKey::from_config(&PoolConfig {
                categories: cats,
                difficulty: Difficulty::Easy,
                tags: vec![],
                total_questions: 3,
            });
            store.put(key.clone(), refs(3)).unwrap();
            keys.push(key);
        }
        keys.sort_by_key(|k| k.encode());
        keys.dedup();

        let expected_removed = keys
            .iter()
            .filter(|k| k.contains_category(&target))
            .count();

        let removed = store.invalidate_by_category(&target);
        prop_assert_eq!(removed, expected_removed);

        for key in &keys {
            let live = store.live_version(key).is_some();
            prop_assert_eq!(live, !key.contains_category(&target));
        }
    }
}
