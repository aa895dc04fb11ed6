//! Training drain: order, gating and suppression.

use crate::common::builder::bundle::{fallthrough_branches, jump, plain, seq_pc, taken_branch};
use crate::common::harness::FtqHarness;
use ftqsim_core::core::pipeline::ftq::{FtqIdx, FtqInputs};
use pretty_assertions::assert_eq;

#[test]
fn drains_in_enqueue_order_exactly_once() {
    let mut h = FtqHarness::default();
    for i in 0..10 {
        h.push(fallthrough_branches(seq_pc(i), 0b1));
    }
    h.ftq.retire(FtqIdx(10));
    let updates = h.drain_all();

    let order: Vec<_> = updates.iter().map(|u| u.ftq_idx.0).collect();
    assert_eq!(order, (0..10).collect::<Vec<_>>());
    for u in &updates[1..] {
        let i = u.ftq_idx.0 as u64;
        assert!(u.valid);
        assert_eq!(u.fetch_pc, seq_pc(i - 1));
        assert_eq!(u.target, seq_pc(i));
    }
    // Nothing is drained twice.
    assert!(h.drain_all().is_empty());
    assert_eq!(h.ftq.stats().updates_drained, 10);
    assert_eq!(h.ftq.stats().updates_valid, 9);
}

#[test]
fn first_record_after_reset_is_suppressed() {
    let mut h = FtqHarness::default();
    h.push(taken_branch(0x1000, 0));
    h.push(plain(0x2000));
    h.ftq.retire(FtqIdx(1));

    let first = h.ftq.drain_update().unwrap();
    assert_eq!(first.ftq_idx, FtqIdx(0));
    assert!(!first.valid);
    assert_eq!(first.target, 0x1000);
    assert_eq!(h.ftq.stats().updates_suppressed(), 1);
}

#[test]
fn suppression_is_rearmed_by_reset() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 3);
    h.retire_all_and_drain();
    h.ftq.reset();

    h.push(taken_branch(0x1000, 0));
    h.push(plain(0x2000));
    h.ftq.retire(FtqIdx(2));
    let updates = h.drain_all();
    assert_eq!(updates.len(), 2);
    assert!(!updates[0].valid);
    assert!(updates[1].valid);
}

#[test]
fn idle_when_update_reaches_retire() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 5);
    assert_eq!(h.ftq.drain_update(), None);

    h.ftq.retire(FtqIdx(2));
    assert_eq!(h.drain_all().len(), 2);
    assert_eq!(h.ftq.update_ptr(), FtqIdx(2));
    assert_eq!(h.ftq.drain_update(), None);
}

#[test]
fn youngest_entry_waits_for_successor() {
    let mut h = FtqHarness::default();
    h.push(taken_branch(0x1000, 0));
    h.push(taken_branch(0x2000, 0));
    let c = h.push(taken_branch(0x3000, 0));
    // Everything committed, including the youngest bundle.
    h.ftq.retire(h.ftq.enqueue_ptr());

    assert_eq!(h.drain_all().len(), 3);
    assert_eq!(h.ftq.update_ptr(), c);

    h.push(plain(0x4000));
    let u = h.ftq.drain_update().unwrap();
    assert_eq!(u.ftq_idx, c);
    assert_eq!(u.target, 0x4000);
}

#[test]
fn branch_mask_is_cut_at_cfi() {
    let mut h = FtqHarness::default();
    h.push(plain(0x1000).with_branches(0b1011).with_cfi(1));
    h.push(plain(0x5000));
    h.ftq.retire(FtqIdx(2));
    let u = h.drain_all().pop().unwrap();
    assert_eq!(u.br_mask, 0b0011);
    assert_eq!(u.cfi_idx, Some(1));
    assert!(u.cfi_taken);
    assert!(u.cfi_is_br);
    assert!(!u.cfi_is_jal);
}

#[test]
fn branch_mask_kept_whole_without_cfi() {
    let mut h = FtqHarness::default();
    h.push(fallthrough_branches(0x1000, 0b1010));
    h.push(plain(0x1010));
    h.ftq.retire(FtqIdx(2));
    let u = h.drain_all().pop().unwrap();
    assert_eq!(u.br_mask, 0b1010);
    assert!(u.valid);
    assert!(!u.cfi_taken);
}

#[test]
fn straight_line_bundle_is_not_valid() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 2);
    h.ftq.retire(FtqIdx(2));
    let u = h.drain_all().pop().unwrap();
    assert_eq!(u.ftq_idx, FtqIdx(1));
    assert!(!u.valid);
}

#[test]
fn jump_only_bundle_is_valid() {
    let mut h = FtqHarness::default();
    h.push(jump(0x1000, 2));
    h.push(plain(0x8000));
    h.ftq.retire(FtqIdx(2));
    let u = h.drain_all().pop().unwrap();
    assert!(u.valid);
    assert!(u.cfi_is_jal);
    assert_eq!(u.br_mask, 0);
    assert_eq!(u.target, 0x8000);
}

#[test]
fn record_carries_entry_history() {
    let mut h = FtqHarness::default();
    h.push(taken_branch(0x1000, 0));
    let b = h.push(taken_branch(0x2000, 0));
    h.push(plain(0x3000));
    h.ftq.retire(FtqIdx(3));
    let u = h.drain_all().pop().unwrap();
    assert_eq!(u.ftq_idx, b);
    assert_eq!(u.ghist, h.ftq.entry(b).ghist);
    assert_eq!(u.ghist.bits(), 0b1);
}

#[test]
fn tick_drains_at_most_one_per_step() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 5);
    h.ftq.retire(FtqIdx(5));

    let drained: Vec<_> = (0..10)
        .filter_map(|_| h.idle().bpd_update)
        .map(|u| u.ftq_idx.0)
        .collect();
    assert_eq!(drained, vec![0, 1, 2, 3, 4]);
}

#[test]
fn draining_frees_capacity() {
    let mut h = FtqHarness::new(8);
    h.push_plain(0x1000, 5);
    assert!(!h.ftq.is_ready());

    h.ftq.retire(FtqIdx(3));
    assert_eq!(h.drain_all().len(), 3);
    assert!(h.ftq.is_ready());

    // One slot back per drained record.
    let mut accepted = 0;
    while h.ftq.enqueue(plain(0x9000)).is_ok() {
        accepted += 1;
    }
    assert_eq!(accepted, 3);
}

#[test]
fn retire_in_same_tick_is_drained_same_tick() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 2);
    let out = h.tick(FtqInputs {
        retire: Some(FtqIdx(1)),
        ..FtqInputs::default()
    });
    let u = out.bpd_update.unwrap();
    assert_eq!(u.ftq_idx, FtqIdx(0));
    assert!(!u.valid);
}
