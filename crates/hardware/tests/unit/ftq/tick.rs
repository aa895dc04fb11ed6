//! Per-step priority and outputs.

use crate::common::builder::bundle::{plain, seq_pc};
use crate::common::harness::FtqHarness;
use ftqsim_core::core::pipeline::ftq::{FtqIdx, FtqInputs, Redirect};
use pretty_assertions::assert_eq;

#[test]
fn ready_reflects_state_before_the_step() {
    let mut h = FtqHarness::new(8);
    h.push_plain(0x1000, 4);

    let out = h.tick(FtqInputs {
        enqueue: Some(plain(0x2000)),
        ..FtqInputs::default()
    });
    assert!(out.ready);
    assert_eq!(out.enqueue_ack, Some(FtqIdx(5)));

    let out = h.idle();
    assert!(!out.ready);
}

#[test]
fn sixteen_entry_fill_through_ticks() {
    let mut h = FtqHarness::default();
    let acks: Vec<_> = (0..14)
        .map(|i| {
            h.tick(FtqInputs {
                enqueue: Some(plain(seq_pc(i))),
                ..FtqInputs::default()
            })
            .enqueue_ack
        })
        .collect();
    let expected: Vec<_> = (1..=13).map(|i| Some(FtqIdx(i))).chain([None]).collect();
    assert_eq!(acks, expected);
    assert_eq!(h.ftq.stats().steps, 14);
}

#[test]
fn full_step_applies_every_input() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 3);

    let out = h.tick(FtqInputs {
        enqueue: Some(plain(0x5000)),
        retire: Some(FtqIdx(2)),
        correction: Some(ftqsim_core::core::pipeline::ftq::Correction {
            idx: FtqIdx(2),
            cfi_idx: 0,
            taken: true,
        }),
        ..FtqInputs::default()
    });
    assert_eq!(out.enqueue_ack, Some(FtqIdx(4)));
    assert_eq!(out.bpd_update.map(|u| u.ftq_idx), Some(FtqIdx(0)));
    assert_eq!(h.ftq.retire_ptr(), FtqIdx(2));
    assert!(h.ftq.entry(FtqIdx(2)).cfi_mispredicted);
}

#[test]
fn redirect_then_retire_same_step() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 5);
    let out = h.tick(FtqInputs {
        redirect: Some(Redirect {
            idx: FtqIdx(3),
            flush_history: false,
        }),
        retire: Some(FtqIdx(3)),
        ..FtqInputs::default()
    });
    assert_eq!(h.ftq.enqueue_ptr(), FtqIdx(4));
    assert_eq!(h.ftq.retire_ptr(), FtqIdx(3));
    assert!(out.bpd_update.is_some());
}

#[test]
fn idle_tick_only_counts_the_step() {
    let mut h = FtqHarness::default();
    let out = h.idle();
    assert!(out.ready);
    assert_eq!(out.enqueue_ack, None);
    assert_eq!(out.bpd_update, None);
    assert_eq!(h.ftq.enqueue_ptr(), FtqIdx(1));
    assert_eq!(h.ftq.stats().steps, 1);
}

#[test]
fn reset_returns_cursors_and_keeps_stats() {
    let mut h = FtqHarness::default();
    h.push_plain(0x1000, 6);
    h.retire_all_and_drain();
    h.ftq.reset();

    assert_eq!(h.ftq.enqueue_ptr(), FtqIdx(1));
    assert_eq!(h.ftq.update_ptr(), FtqIdx(0));
    assert_eq!(h.ftq.retire_ptr(), FtqIdx(0));
    assert_eq!(h.ftq.entry(FtqIdx(3)).fetch_pc, 0);
    assert_eq!(h.ftq.stats().enqueues, 6);
}
