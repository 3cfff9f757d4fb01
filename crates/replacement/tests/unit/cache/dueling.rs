//! Set Dueling Tests.
//!
//! Verifies the fixed monitor classification, the saturating policy selector, the
//! bimodal throttle period, and the shared per-insertion dueling step.

use proptest::prelude::*;
use rstest::rstest;
use setduel_core::cache::dueling::{
    BimodalThrottle, InsertionMode, PolicySelector, SetDueling, SetRole, classify,
};
use setduel_core::config::DuelingConfig;

use crate::common::harness::dueling_at;

// ══════════════════════════════════════════════════════════
// 1. Classification
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0, SetRole::PlainMonitor)]
#[case(33, SetRole::PlainMonitor)]
#[case(66, SetRole::PlainMonitor)]
#[case(31, SetRole::BimodalMonitor)]
#[case(62, SetRole::BimodalMonitor)]
#[case(93, SetRole::BimodalMonitor)]
#[case(1, SetRole::Follower)]
#[case(32, SetRole::Follower)]
#[case(34, SetRole::Follower)]
#[case(1023, SetRole::PlainMonitor)]
fn classify_by_index(#[case] set: usize, #[case] role: SetRole) {
    assert_eq!(classify(set), role);
}

/// About 1 in 32 sets monitors each policy.
#[test]
fn monitor_density() {
    let sets = 1024;
    let plain = (0..sets).filter(|&s| classify(s) == SetRole::PlainMonitor).count();
    let bimodal = (0..sets).filter(|&s| classify(s) == SetRole::BimodalMonitor).count();
    assert_eq!(plain, 32);
    assert_eq!(bimodal, 32);
}

// ══════════════════════════════════════════════════════════
// 2. Policy Selector
// ══════════════════════════════════════════════════════════

#[test]
fn selector_starts_at_midpoint_favouring_bimodal() {
    let psel = PolicySelector::default();
    assert_eq!(psel.value(), 512);
    assert_eq!(psel.max(), 1023);
    assert_eq!(psel.follower_mode(), InsertionMode::Bimodal);
}

#[test]
fn increments_saturate_at_max() {
    let mut psel = PolicySelector::with_value(10, 0);
    for _ in 0..1024 {
        psel.record_plain_miss();
    }
    assert_eq!(psel.value(), 1023);
}

#[test]
fn decrements_saturate_at_zero() {
    let mut psel = PolicySelector::with_value(10, 1023);
    for _ in 0..1024 {
        psel.record_bimodal_miss();
    }
    assert_eq!(psel.value(), 0);
}

#[rstest]
#[case(0, InsertionMode::Plain)]
#[case(511, InsertionMode::Plain)]
#[case(512, InsertionMode::Bimodal)]
#[case(1023, InsertionMode::Bimodal)]
fn follower_mode_threshold(#[case] value: u32, #[case] mode: InsertionMode) {
    assert_eq!(PolicySelector::with_value(10, value).follower_mode(), mode);
}

#[test]
fn restored_value_is_clamped() {
    assert_eq!(PolicySelector::with_value(10, 5000).value(), 1023);
}

#[test]
fn narrow_selector_midpoint() {
    let psel = PolicySelector::new(4);
    assert_eq!(psel.max(), 15);
    assert_eq!(psel.midpoint(), 8);
    assert_eq!(psel.value(), 8);
}

proptest! {
    #[test]
    fn selector_never_leaves_range(ops in proptest::collection::vec(any::<bool>(), 0..4096)) {
        let mut psel = PolicySelector::default();
        for plain_miss in ops {
            if plain_miss {
                psel.record_plain_miss();
            } else {
                psel.record_bimodal_miss();
            }
            prop_assert!(psel.value() <= 1023);
        }
        prop_assert_eq!(psel.follower_mode() == InsertionMode::Plain, psel.value() < 512);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Bimodal Throttle
// ══════════════════════════════════════════════════════════

#[test]
fn first_call_of_each_period_is_high_priority() {
    let mut throttle = BimodalThrottle::default();
    let calls: Vec<bool> = (0..64).map(|_| throttle.should_insert_high_priority()).collect();

    let high: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter_map(|(i, &h)| h.then_some(i))
        .collect();
    assert_eq!(high, vec![0, 32]);
    assert_eq!(throttle.position(), 0);
}

#[test]
fn counter_advances_on_both_branches() {
    let mut throttle = BimodalThrottle::starting_at(32, 5);
    assert!(!throttle.should_insert_high_priority());
    assert_eq!(throttle.position(), 6);

    let mut throttle = BimodalThrottle::starting_at(32, 0);
    assert!(throttle.should_insert_high_priority());
    assert_eq!(throttle.position(), 1);
}

#[test]
fn restored_position_wraps() {
    assert_eq!(BimodalThrottle::starting_at(32, 37).position(), 5);
}

proptest! {
    #[test]
    fn one_high_priority_call_per_window(start in 0u32..32) {
        let mut throttle = BimodalThrottle::starting_at(32, start);
        let calls: Vec<bool> = (0..32).map(|_| throttle.should_insert_high_priority()).collect();
        prop_assert_eq!(calls.iter().filter(|&&h| h).count(), 1);
        let expected = ((32 - start) % 32) as usize;
        prop_assert!(calls[expected]);
    }
}

// ══════════════════════════════════════════════════════════
// 4. Per-insertion dueling step
// ══════════════════════════════════════════════════════════

#[test]
fn plain_monitor_increments_and_uses_plain() {
    let mut dueling = dueling_at(100);
    assert_eq!(
        dueling.select_insertion(33),
        (SetRole::PlainMonitor, InsertionMode::Plain)
    );
    assert_eq!(dueling.selector().value(), 101);
}

#[test]
fn bimodal_monitor_decrements_and_uses_bimodal() {
    let mut dueling = dueling_at(900);
    assert_eq!(
        dueling.select_insertion(62),
        (SetRole::BimodalMonitor, InsertionMode::Bimodal)
    );
    assert_eq!(dueling.selector().value(), 899);
}

#[test]
fn follower_reads_selector_without_updating() {
    let mut dueling = dueling_at(511);
    assert_eq!(dueling.select_insertion(1), (SetRole::Follower, InsertionMode::Plain));
    assert_eq!(dueling.selector().value(), 511);

    let mut dueling = dueling_at(512);
    assert_eq!(dueling.select_insertion(1), (SetRole::Follower, InsertionMode::Bimodal));
    assert_eq!(dueling.selector().value(), 512);
}

/// Followers flip as soon as the plain monitors miss less than the bimodal ones.
#[test]
fn followers_switch_when_selector_crosses_midpoint() {
    let mut dueling = SetDueling::new(&DuelingConfig::default());
    let _ = dueling.select_insertion(31);
    assert_eq!(dueling.select_insertion(2).1, InsertionMode::Plain);

    let _ = dueling.select_insertion(0);
    assert_eq!(dueling.select_insertion(2).1, InsertionMode::Bimodal);
}
