//! Shared test helpers for E2E tests.

use std::path::Path;

use chainsplit_chain::{ChainManager, FileStore, FixedClock};
use chainsplit_core::types::Participant;
use chrono::NaiveDate;

/// Join date used by every helper-opened manager.
pub fn join_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Open a file-backed manager in `dir` with a fixed join date.
pub fn open_in(dir: &Path, total: f64) -> ChainManager<FileStore> {
    ChainManager::open_with_clock(FileStore::in_dir(dir), total, Box::new(FixedClock(join_day())))
        .unwrap()
}

/// Percentages of a chain, in order.
pub fn shares(chain: &[Participant]) -> Vec<u8> {
    chain.iter().map(|p| p.percentage).collect()
}

/// Amounts of a chain, in order.
pub fn amounts(chain: &[Participant]) -> Vec<f64> {
    chain.iter().map(|p| p.amount).collect()
}

/// Assert the level, share-sum and amount invariants.
pub fn assert_consistent(chain: &[Participant], total: f64) {
    assert!(!chain.is_empty(), "chain must never be empty");
    let sum: u32 = chain.iter().map(|p| p.percentage as u32).sum();
    assert_eq!(sum, 100, "shares must sum to 100: {:?}", shares(chain));
    for (i, p) in chain.iter().enumerate() {
        assert_eq!(p.level as usize, i + 1, "level mismatch at index {i}");
        assert_eq!(p.amount, total * p.percentage as f64 / 100.0);
    }
}
