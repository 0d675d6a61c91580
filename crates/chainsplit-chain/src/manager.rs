//! Chain management: the live participant list, its total, and persistence.
//!
//! [`ChainManager`] owns the current chain and total. Every successful
//! mutation recomputes shares and amounts and overwrites the stored entry
//! before the in-memory state changes, so a failed write leaves the manager
//! exactly as it was.

use chainsplit_core::error::{ChainError, StoreError};
use chainsplit_core::genesis::default_chain;
use chainsplit_core::traits::{ChainStore, Clock};
use chainsplit_core::types::{DistributionSummary, Participant};
use tracing::{debug, info, warn};

use crate::clock::SystemClock;
use crate::ops;

/// Live referral chain backed by a [`ChainStore`].
pub struct ChainManager<S: ChainStore> {
    store: S,
    clock: Box<dyn Clock>,
    chain: Vec<Participant>,
    total: f64,
    /// Next id to hand out. Only ever grows, so ids stay distinct for the
    /// life of the manager even when the tail is removed. `None` once
    /// `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

fn check_total(total: f64) -> Result<(), ChainError> {
    if total.is_finite() {
        Ok(())
    } else {
        Err(ChainError::NonFiniteTotal(total))
    }
}

impl<S: ChainStore> ChainManager<S> {
    /// Load the stored chain, or seed and persist the default one.
    pub fn open(store: S, total: f64) -> Result<Self, ChainError> {
        Self::open_with_clock(store, total, Box::new(SystemClock))
    }

    /// Like [`open`](Self::open) with an explicit date source for new joins.
    ///
    /// A stored entry that fails to decode, is empty, repeats an id, or
    /// holds id `u64::MAX` is treated as absent: the default chain is seeded
    /// and written back. A stored chain whose levels or level suffixes
    /// disagree with positions is renumbered and written back. I/O failures
    /// are returned.
    pub fn open_with_clock(store: S, total: f64, clock: Box<dyn Clock>) -> Result<Self, ChainError> {
        check_total(total)?;

        let stored = match store.load() {
            Ok(Some(chain)) => match ops::validate_snapshot(&chain) {
                Ok(()) => Some(chain),
                Err(reason) => {
                    warn!(%reason, "stored chain rejected, reseeding defaults");
                    None
                }
            },
            Ok(None) => None,
            Err(StoreError::CorruptedEntry(reason)) => {
                warn!(%reason, "stored chain unreadable, reseeding defaults");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let mut manager = Self {
            store,
            clock,
            chain: Vec::new(),
            total,
            next_id: Some(1),
        };

        match stored {
            Some(chain) => {
                info!(participants = chain.len(), "loaded stored chain");
                let renumbered = ops::renumber(&chain);
                if renumbered == chain {
                    manager.chain = ops::recompute(&chain, total);
                } else {
                    warn!("stored levels out of position, renumbering");
                    manager.commit(ops::recompute(&renumbered, total))?;
                }
            }
            None => {
                info!("no stored chain, seeding defaults");
                manager.commit(ops::recompute(&default_chain(), total))?;
            }
        }
        manager.next_id = ops::next_id(&manager.chain);

        Ok(manager)
    }

    /// Persist `next` and make it current.
    fn commit(&mut self, next: Vec<Participant>) -> Result<(), ChainError> {
        self.store.save(&next)?;
        debug!(participants = next.len(), total = self.total, "chain committed");
        self.next_id = self.next_id.zip(ops::next_id(&next)).map(|(a, b)| a.max(b));
        self.chain = next;
        Ok(())
    }

    /// Current participants in chain order.
    pub fn participants(&self) -> &[Participant] {
        &self.chain
    }

    /// Amount being split.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false for an opened manager; the chain never drops below one.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Look up a participant by id.
    pub fn get(&self, id: u64) -> Option<&Participant> {
        self.chain.iter().find(|p| p.id == id)
    }

    /// Whether a removal would take effect. False at one participant.
    pub fn can_remove(&self) -> bool {
        self.chain.len() > chainsplit_core::constants::MIN_CHAIN_LEN
    }

    /// Change the total and re-derive every amount.
    pub fn set_total(&mut self, total: f64) -> Result<(), ChainError> {
        check_total(total)?;
        let next = ops::recompute(&self.chain, total);
        self.store.save(&next)?;
        self.total = total;
        self.chain = next;
        debug!(total, "total updated");
        Ok(())
    }

    /// Append a participant at the tail.
    ///
    /// Returns the new participant's id, or `None` when `name` is blank (no
    /// change, no write). Fails with [`ChainError::IdsExhausted`] once every
    /// id has been used.
    pub fn add_participant(&mut self, name: &str) -> Result<Option<u64>, ChainError> {
        if name.trim().is_empty() {
            debug!("blank name, add ignored");
            return Ok(None);
        }
        let id = self.next_id.ok_or(ChainError::IdsExhausted)?;
        let joined = self.clock.today();
        let Some(next) = ops::add_participant(&self.chain, name, self.total, id, joined) else {
            debug!("blank name, add ignored");
            return Ok(None);
        };

        self.commit(next)?;
        info!(id, name = name.trim(), level = self.chain.len(), "participant added");
        Ok(Some(id))
    }

    /// Remove the participant with `id` and renumber the rest.
    ///
    /// Returns `false` without writing when only one participant remains or
    /// `id` is unknown.
    pub fn remove_participant(&mut self, id: u64) -> Result<bool, ChainError> {
        let Some(next) = ops::remove_participant(&self.chain, id, self.total) else {
            debug!(id, participants = self.chain.len(), "remove ignored");
            return Ok(false);
        };

        self.commit(next)?;
        info!(id, participants = self.chain.len(), "participant removed");
        Ok(true)
    }

    /// Replace the chain with the default seed.
    pub fn reset(&mut self) -> Result<(), ChainError> {
        self.commit(ops::recompute(&default_chain(), self.total))?;
        info!("chain reset to defaults");
        Ok(())
    }

    /// Totals for the current chain.
    pub fn summary(&self) -> DistributionSummary {
        DistributionSummary::of(&self.chain, self.total)
    }

    /// Acknowledge the current split. No funds move; the payout is logged
    /// and summarized.
    pub fn distribute(&self) -> DistributionSummary {
        let summary = self.summary();
        for p in &self.chain {
            info!(id = p.id, name = %p.name, percentage = p.percentage, amount = p.amount, "payout");
        }
        info!(
            total = summary.total,
            participants = summary.participant_count,
            distributed = summary.distributed,
            "distribution complete"
        );
        summary
    }

    /// Access the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ChainStore> std::fmt::Debug for ChainManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainManager")
            .field("participants", &self.chain.len())
            .field("total", &self.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use chainsplit_alloc::allocate;
    use chrono::NaiveDate;

    // --- Mocks ---

    struct FailingStore;

    impl ChainStore for FailingStore {
        fn load(&self) -> Result<Option<Vec<Participant>>, StoreError> {
            Ok(None)
        }
        fn save(&self, _: &[Participant]) -> Result<(), StoreError> {
            Err(StoreError::Io("read-only".into()))
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn open(store: &MemoryStore, total: f64) -> ChainManager<&MemoryStore> {
        ChainManager::open_with_clock(store, total, Box::new(FixedClock(june_first()))).unwrap()
    }

    fn shares(m: &ChainManager<&MemoryStore>) -> Vec<u8> {
        m.participants().iter().map(|p| p.percentage).collect()
    }

    // --- open ---

    #[test]
    fn open_empty_store_seeds_and_persists() {
        let store = MemoryStore::default();
        let m = open(&store, 1000.0);

        assert_eq!(m.len(), 3);
        assert_eq!(shares(&m), vec![50, 30, 20]);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.load().unwrap().unwrap(), m.participants());
    }

    #[test]
    fn open_existing_store_does_not_write() {
        let store = MemoryStore::default();
        open(&store, 1000.0);
        let m = open(&store, 500.0);

        assert_eq!(store.write_count(), 1);
        assert_eq!(m.participants()[0].amount, 250.0);
    }

    #[test]
    fn open_corrupt_store_reseeds() {
        let store = MemoryStore::default();
        store.insert_raw("{not json");
        let m = open(&store, 1000.0);

        assert_eq!(m.len(), 3);
        assert_eq!(store.write_count(), 1);
        assert!(store.load().is_ok());
    }

    #[test]
    fn open_empty_array_reseeds() {
        let store = MemoryStore::default();
        store.insert_raw("[]");
        let m = open(&store, 1000.0);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn open_duplicate_ids_reseeds() {
        let store = MemoryStore::default();
        let mut chain = default_chain();
        chain[2].id = 2;
        store.save(&chain).unwrap();

        let m = open(&store, 1000.0);
        let ids: Vec<u64> = m.participants().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn open_max_id_reseeds_instead_of_overflowing() {
        let store = MemoryStore::default();
        store.insert_raw(
            r#"[{"id":18446744073709551615,"name":"Max (Level 1)","level":1,"percentage":100,"amount":0,"joinedDate":"2024-01-01"}]"#,
        );
        let mut m = open(&store, 1000.0);

        let ids: Vec<u64> = m.participants().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(m.add_participant("Alex").unwrap(), Some(4));
    }

    #[test]
    fn add_after_last_id_is_exhausted() {
        let store = MemoryStore::default();
        let mut chain = default_chain();
        chain[2].id = u64::MAX - 1;
        store.save(&chain).unwrap();

        let mut m = open(&store, 1000.0);
        assert_eq!(m.add_participant("Alex").unwrap(), Some(u64::MAX));
        assert_eq!(m.add_participant("Bea").unwrap_err(), ChainError::IdsExhausted);
        assert_eq!(m.len(), 4);
        assert_eq!(m.add_participant(" ").unwrap(), None);
    }

    #[test]
    fn open_renumbers_stale_levels_and_persists() {
        let store = MemoryStore::default();
        let mut chain = default_chain()[1..].to_vec();
        chain[0].level = 7;
        chain[0].name = "Sarah (Level 7)".into();
        chain[1].level = 9;
        chain[1].name = "Mike (Level 9)".into();
        store.save(&chain).unwrap();

        let m = open(&store, 1000.0);
        let levels: Vec<u32> = m.participants().iter().map(|p| p.level).collect();
        let names: Vec<&str> = m.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(levels, vec![1, 2]);
        assert_eq!(names, vec!["Sarah (Level 1)", "Mike (Level 2)"]);
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.load().unwrap().unwrap(), m.participants());
    }

    #[test]
    fn open_rejects_non_finite_total() {
        let store = MemoryStore::default();
        let err = ChainManager::open(&store, f64::NAN).unwrap_err();
        assert!(matches!(err, ChainError::NonFiniteTotal(_)));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn open_propagates_io_failure() {
        let err = ChainManager::open(FailingStore, 1000.0).unwrap_err();
        assert_eq!(err, ChainError::Store(StoreError::Io("read-only".into())));
    }

    // --- mutations ---

    #[test]
    fn add_recomputes_and_persists() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);

        let id = m.add_participant("Alex").unwrap().unwrap();
        let alex = m.get(id).unwrap();
        assert_eq!(alex.name, "Alex (Level 4)");
        assert_eq!(alex.level, 4);
        assert_eq!(alex.joined_date, june_first());
        assert_eq!(shares(&m), allocate(4));
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.load().unwrap().unwrap(), m.participants());
    }

    #[test]
    fn add_blank_is_silent_noop() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        let before = m.participants().to_vec();

        assert_eq!(m.add_participant("  ").unwrap(), None);
        assert_eq!(m.participants(), before.as_slice());
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn remove_last_remaining_is_noop() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        assert!(m.remove_participant(3).unwrap());
        assert!(m.remove_participant(2).unwrap());
        assert!(!m.can_remove());

        let before = m.participants().to_vec();
        assert!(!m.remove_participant(1).unwrap());
        assert_eq!(m.participants(), before.as_slice());
        assert_eq!(m.participants()[0].percentage, 100);
        assert_eq!(m.participants()[0].amount, 1000.0);
    }

    #[test]
    fn remove_unknown_id_does_not_write() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        assert!(!m.remove_participant(42).unwrap());
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn ids_not_reused_after_removal() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        m.remove_participant(3).unwrap();
        let id = m.add_participant("Zoe").unwrap().unwrap();
        assert_eq!(id, 4, "removed tail id 3 must not be handed out again");

        m.remove_participant(4).unwrap();
        let id = m.add_participant("Yan").unwrap().unwrap();
        assert_eq!(id, 5);
    }

    #[test]
    fn set_total_rederives_amounts() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        m.set_total(-20.0).unwrap();

        let amounts: Vec<f64> = m.participants().iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![-10.0, -6.0, -4.0]);
        assert_eq!(m.total(), -20.0);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn set_total_rejects_infinity_without_change() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        assert!(m.set_total(f64::INFINITY).is_err());
        assert_eq!(m.total(), 1000.0);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let mut m = ChainManager {
            store: FailingStore,
            clock: Box::new(FixedClock(june_first())),
            chain: ops::recompute(&default_chain(), 100.0),
            total: 100.0,
            next_id: Some(4),
        };
        assert!(m.add_participant("Alex").is_err());
        assert_eq!(m.len(), 3);
        assert!(m.set_total(5.0).is_err());
        assert_eq!(m.total(), 100.0);
    }

    #[test]
    fn reset_restores_seed() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        m.add_participant("Alex").unwrap();
        m.remove_participant(1).unwrap();
        m.reset().unwrap();

        let names: Vec<&str> = m.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["John (Founder)", "Sarah (Level 2)", "Mike (Level 3)"]);
    }

    #[test]
    fn summary_and_distribute_agree() {
        let store = MemoryStore::default();
        let mut m = open(&store, 1000.0);
        m.add_participant("Alex").unwrap();
        m.add_participant("Bea").unwrap();

        let s = m.distribute();
        assert_eq!(s, m.summary());
        assert_eq!(s.participant_count, 5);
        assert_eq!(s.distributed, 1000.0);
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn debug_format() {
        let store = MemoryStore::default();
        let m = open(&store, 1000.0);
        let debug = format!("{m:?}");
        assert!(debug.contains("ChainManager"));
        assert!(debug.contains("participants: 3"));
    }
}
