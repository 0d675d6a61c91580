//! Percentage allocation over a chain of `count` participants.
//!
//! [`allocate`] is the production policy. [`decay_split`] is the bare decay
//! rule without the two-party special case; `allocate` delegates to it for
//! every count other than 2.

use chainsplit_core::constants::{
    DECAY_DENOMINATOR, DECAY_NUMERATOR, HEAD_SHARE, PERCENT_TOTAL, TWO_PARTY_SPLIT,
};

/// Whole-percent shares for a chain of `count` participants.
///
/// Position `i` of the result is the share of the participant at index `i`.
/// Sums to 100 for every `count >= 1`; empty for `count == 0`.
///
/// # Examples
///
/// ```
/// use chainsplit_alloc::allocate;
/// assert_eq!(allocate(1), vec![100]);
/// assert_eq!(allocate(2), vec![70, 30]);
/// assert_eq!(allocate(5), vec![50, 30, 12, 4, 4]);
/// ```
pub fn allocate(count: usize) -> Vec<u8> {
    if count == TWO_PARTY_SPLIT.len() {
        return TWO_PARTY_SPLIT.to_vec();
    }
    decay_split(count)
}

/// The decay rule on its own.
///
/// `remaining` starts at 100. Index 0 takes [`HEAD_SHARE`], the last index
/// takes whatever is left, and each interior index takes
/// `remaining * 6 / 10`. A single participant is both head and tail and
/// takes the whole 100.
pub fn decay_split(count: usize) -> Vec<u8> {
    let mut shares = Vec::with_capacity(count);
    let mut remaining = PERCENT_TOTAL as u32;

    for i in 0..count {
        let share = if i == count - 1 {
            remaining
        } else if i == 0 {
            HEAD_SHARE as u32
        } else {
            remaining * DECAY_NUMERATOR / DECAY_DENOMINATOR
        };
        remaining -= share;
        // remaining never exceeds 100, so every share fits.
        shares.push(share as u8);
    }

    tracing::trace!(count, ?shares, "decay split");
    shares
}
