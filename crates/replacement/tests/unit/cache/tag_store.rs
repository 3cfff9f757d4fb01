//! Tag Store Tests.
//!
//! Verifies the four controller entry points: policy dispatch from configuration,
//! allocation handling on insert, invalidation, and precondition failures.

use setduel_core::TagStore;
use setduel_core::cache::BlockId;
use setduel_core::cache::policies::DipPolicy;
use setduel_core::cache::rrpv::Rrpv;
use setduel_core::common::ConfigError;
use setduel_core::config::{DuelingConfig, ReplacementPolicy as PolicyType};

use crate::common::harness::small_config;

#[test]
fn geometry_follows_config() {
    let tags = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    assert_eq!(tags.num_sets(), 64);
    assert_eq!(tags.ways(), 4);
    assert_eq!(tags.policy().selector().value(), 512);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = small_config(PolicyType::Drrip);
    config.ways = 0;
    assert!(matches!(TagStore::new(&config), Err(ConfigError::ZeroWays)));
}

// ══════════════════════════════════════════════════════════
// 1. Insert
// ══════════════════════════════════════════════════════════

/// A new allocation resets the block before the policy places it.
#[test]
fn new_allocation_marks_valid_and_places_block() {
    let mut tags = TagStore::new(&small_config(PolicyType::Drrip)).unwrap();
    let id = BlockId::new(1, 2);
    tags.block_mut(id).tag = 0x42;

    tags.insert(id, true);
    let blk = tags.block(id);
    assert!(blk.valid);
    assert_eq!(blk.tag, 0x42);
    // Follower set, selector at midpoint (BRRIP), throttle at zero: long.
    assert_eq!(blk.rrpv, Rrpv::LONG);
    assert_eq!(tags.stats().insertions, 1);
}

/// A refill leaves the controller-owned validity alone but still duels.
#[test]
fn refill_keeps_block_state() {
    let mut tags = TagStore::new(&small_config(PolicyType::Drrip)).unwrap();
    let id = BlockId::new(33, 0);

    tags.insert(id, false);
    assert!(!tags.block(id).valid);
    assert_eq!(tags.block(id).rrpv, Rrpv::LONG);
    assert_eq!(tags.policy().selector().value(), 513);
}

#[test]
fn monitor_inserts_move_selector() {
    let mut tags = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    tags.insert(BlockId::new(0, 3), true);
    tags.insert(BlockId::new(33, 3), true);
    tags.insert(BlockId::new(31, 3), true);
    tags.insert(BlockId::new(5, 3), true);
    assert_eq!(tags.policy().selector().value(), 513);

    let stats = tags.stats();
    assert_eq!(stats.plain_monitor_misses, 2);
    assert_eq!(stats.bimodal_monitor_misses, 1);
    assert_eq!(stats.follower_insertions, 1);
}

/// Dueling state belongs to each tag store.
#[test]
fn tag_stores_are_independent() {
    let mut a = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    let b = TagStore::new(&small_config(PolicyType::Dip)).unwrap();

    for _ in 0..10 {
        a.insert(BlockId::new(0, 0), true);
    }
    assert_eq!(a.policy().selector().value(), 522);
    assert_eq!(b.policy().selector().value(), 512);
}

// ══════════════════════════════════════════════════════════
// 2. Hit, victim, invalidate
// ══════════════════════════════════════════════════════════

#[test]
fn dip_hit_and_victim() {
    let mut tags = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    assert_eq!(tags.find_victim(7), BlockId::new(7, 3));

    tags.access_hit(BlockId::new(7, 3));
    assert_eq!(tags.find_victim(7), BlockId::new(7, 2));
    assert_eq!(tags.stats().hits, 1);
}

#[test]
fn invalidate_clears_valid_and_demotes() {
    let mut tags = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    let id = BlockId::new(9, 0);
    tags.insert(id, true);
    tags.access_hit(id);
    assert!(tags.block(id).valid);

    tags.invalidate(id);
    assert!(!tags.block(id).valid);
    assert_eq!(tags.find_victim(9), id);
}

#[test]
fn drrip_invalidate_sets_distant() {
    let mut tags = TagStore::new(&small_config(PolicyType::Drrip)).unwrap();
    let id = BlockId::new(2, 1);
    tags.insert(id, true);
    tags.access_hit(id);
    assert_eq!(tags.block(id).rrpv, Rrpv::NEAR_IMMEDIATE);

    tags.invalidate(id);
    assert_eq!(tags.block(id).rrpv, Rrpv::DISTANT);
}

#[test]
fn custom_policy_can_be_injected() {
    let policy = DipPolicy::new(&DuelingConfig {
        eps_inverse: 4,
        psel_bits: 6,
    });
    let tags = TagStore::with_policy(8, 2, Box::new(policy));
    assert_eq!(tags.num_sets(), 8);
    assert_eq!(tags.policy().selector().max(), 63);
    assert_eq!(tags.policy().throttle().eps_inverse(), 4);
}

// ══════════════════════════════════════════════════════════
// 3. Precondition violations
// ══════════════════════════════════════════════════════════

#[test]
#[should_panic(expected = "out of range")]
fn victim_in_unknown_set_panics() {
    let mut tags = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    let _ = tags.find_victim(64);
}

#[test]
#[should_panic(expected = "does not belong")]
fn hit_on_foreign_way_panics() {
    let mut tags = TagStore::new(&small_config(PolicyType::Drrip)).unwrap();
    tags.access_hit(BlockId::new(0, 4));
}

#[test]
#[should_panic(expected = "does not belong")]
fn insert_of_foreign_way_panics() {
    let mut tags = TagStore::new(&small_config(PolicyType::Dip)).unwrap();
    tags.insert(BlockId::new(3, 9), true);
}
