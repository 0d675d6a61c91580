//! # chainsplit-alloc — Decay allocation engine.
//!
//! All share calculations use integer arithmetic only for determinism.
//!
//! - **Decay split**: the head takes 50%, every interior participant takes
//!   60% of what remains (floored), the tail absorbs the residue.
//! - **Two-party split**: a chain of two is fixed at `[70, 30]`.
//! - **Shares**: monetary amounts are `total * percentage / 100` in `f64`.

pub mod engine;
pub mod share;

pub use engine::{allocate, decay_split};
pub use share::{distributed_total, share_of};
