//! # chainsplit-chain — Referral chain management with persistence.
//!
//! Applies add/remove/renumber operations to an ordered participant list,
//! re-derives shares and amounts after every change, and writes the result
//! through a [`ChainStore`](chainsplit_core::traits::ChainStore).
//!
//! # Modules
//!
//! - [`ops`] — pure chain transformations (recompute, add, remove)
//! - [`manager`] — `ChainManager`, the stateful owner of a chain
//! - [`store`] — JSON file and in-memory stores
//! - [`clock`] — system and fixed date sources
//! - [`view`] — amount and hierarchy formatting

pub mod clock;
pub mod manager;
pub mod ops;
pub mod store;
pub mod view;

// Re-exports for convenient access
pub use clock::{FixedClock, SystemClock};
pub use manager::ChainManager;
pub use ops::{add_participant, recompute, remove_participant};
pub use store::{FileStore, MemoryStore};
