//! Monetary amounts derived from whole-percent shares.
//!
//! Amounts are display values in `f64`. The total is user-entered and may be
//! fractional, zero or negative; it is propagated as-is.

use chainsplit_core::constants::PERCENT_TOTAL;

/// `total * percentage / 100`.
pub fn share_of(total: f64, percentage: u8) -> f64 {
    total * percentage as f64 / PERCENT_TOTAL as f64
}

/// Sum of the amounts for every share.
pub fn distributed_total(total: f64, shares: &[u8]) -> f64 {
    shares.iter().map(|&p| share_of(total, p)).sum()
}
