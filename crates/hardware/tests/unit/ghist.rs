//! Global history update rules.

use ftqsim_core::core::units::bru::GlobalHistory;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
// Taken branch at the CFI slot.
#[case(0b0100, Some(2), true, 0b11)]
// Not-taken branch before a taken jump.
#[case(0b0001, Some(2), true, 0b10)]
// Mispredicted CFI resolved not taken.
#[case(0b0100, Some(2), false, 0b10)]
// Branch only after the CFI.
#[case(0b1000, Some(1), true, 0b1)]
// Jump alone.
#[case(0, Some(0), true, 0b1)]
// Straight-line bundle with a branch.
#[case(0b0010, None, false, 0b10)]
// Straight-line bundle without branches.
#[case(0, None, false, 0b1)]
fn update_from_single_bit(
    #[case] br_mask: u64,
    #[case] cfi_idx: Option<u32>,
    #[case] taken: bool,
    #[case] expected: u64,
) {
    let start = GlobalHistory::empty(16).push(true);
    assert_eq!(start.update(br_mask, cfi_idx, taken).bits(), expected);
}

#[test]
fn empty_history_has_no_bits() {
    let h = GlobalHistory::empty(32);
    assert_eq!(h.bits(), 0);
    assert_eq!(h.length(), 32);
}

#[test]
fn oldest_bit_falls_off() {
    let h = GlobalHistory::empty(3).push(true).push(false).push(false);
    assert_eq!(h.bits(), 0b100);
    assert_eq!(h.push(true).bits(), 0b001);
}

#[test]
fn full_width_history_keeps_all_bits() {
    let mut h = GlobalHistory::empty(64);
    for _ in 0..64 {
        h = h.push(true);
    }
    assert_eq!(h.bits(), u64::MAX);
}

proptest! {
    // The register never holds bits beyond its length.
    #[test]
    fn bits_stay_within_length(
        length in 1usize..=64,
        steps in prop::collection::vec((any::<u8>(), prop::option::of(0u32..8), any::<bool>()), 0..100),
    ) {
        let mut h = GlobalHistory::empty(length);
        for (br_mask, cfi_idx, taken) in steps {
            h = h.update(u64::from(br_mask), cfi_idx, taken);
            prop_assert_eq!(h.length(), length);
            if length < 64 {
                prop_assert_eq!(h.bits() >> length, 0);
            }
        }
    }

    // A bundle shifts in at most one bit.
    #[test]
    fn update_shifts_at_most_once(
        seed in any::<u16>(),
        br_mask in any::<u8>(),
        cfi_idx in prop::option::of(0u32..8),
        taken in any::<bool>(),
    ) {
        let h = GlobalHistory::empty(32);
        let h = (0..16).fold(h, |h, i| h.push(seed & (1 << i) != 0));
        let next = h.update(u64::from(br_mask), cfi_idx, taken);
        prop_assert!(
            next == h || next == h.push(true) || next == h.push(false),
            "history moved by more than one bit"
        );
    }
}
