//! Slot mask helpers.
//!
//! Fetch bundles describe their branches and jumps as one bit per
//! instruction slot. These helpers build the masks used when slicing a
//! bundle at its control-flow instruction.

/// One-hot mask selecting slot `idx`.
#[inline(always)]
pub const fn slot_bit(idx: u32) -> u64 {
    1u64 << idx
}

/// Mask selecting slots `0..=idx`.
///
/// # Examples
///
/// ```
/// use ftqsim_core::common::mask::mask_upto;
///
/// assert_eq!(mask_upto(0), 0b1);
/// assert_eq!(mask_upto(2), 0b111);
/// assert_eq!(mask_upto(63), u64::MAX);
/// ```
#[inline(always)]
pub const fn mask_upto(idx: u32) -> u64 {
    u64::MAX >> (63 - idx)
}

/// Mask covering every slot of a bundle `width` instructions wide.
///
/// `width` must be in `1..=64`.
#[inline(always)]
pub const fn width_mask(width: usize) -> u64 {
    u64::MAX >> (64 - width)
}
