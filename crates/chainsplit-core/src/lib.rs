//! # chainsplit-core
//! Foundation types and traits for referral-chain payout splitting.

pub mod constants;
pub mod error;
pub mod genesis;
pub mod traits;
pub mod types;
