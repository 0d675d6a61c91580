//! End-to-end test suite for chainsplit.
//!
//! Drives `ChainManager` against real file stores and checks that every
//! share, amount and level invariant holds across reopen cycles.

pub mod helpers;
