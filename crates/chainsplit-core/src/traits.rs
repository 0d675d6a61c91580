//! Trait interfaces for chainsplit.
//!
//! - [`ChainStore`] — persistence of the participant list (chainsplit-chain implements)
//! - [`Clock`] — source of the current calendar date for new participants

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::types::Participant;

/// Key-value persistence of a single serialized chain.
///
/// Every save overwrites the whole entry. Implementations report
/// undecodable entries as [`StoreError::CorruptedEntry`] so callers can
/// tell them apart from I/O failures.
pub trait ChainStore: Send + Sync {
    /// Read the stored chain. Returns `None` if the entry does not exist.
    fn load(&self) -> Result<Option<Vec<Participant>>, StoreError>;

    /// Overwrite the stored chain.
    fn save(&self, chain: &[Participant]) -> Result<(), StoreError>;
}

impl<S: ChainStore + ?Sized> ChainStore for &S {
    fn load(&self) -> Result<Option<Vec<Participant>>, StoreError> {
        (**self).load()
    }

    fn save(&self, chain: &[Participant]) -> Result<(), StoreError> {
        (**self).save(chain)
    }
}

/// Source of "today" for join dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
