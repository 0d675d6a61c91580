//! Pure chain transformations.
//!
//! Each function takes the current chain and returns the next one. None of
//! them touch storage; [`ChainManager`](crate::manager::ChainManager) wires
//! them to a [`ChainStore`](chainsplit_core::traits::ChainStore).

use std::collections::HashSet;

use chainsplit_alloc::{allocate, share_of};
use chainsplit_core::constants::MIN_CHAIN_LEN;
use chainsplit_core::types::Participant;
use chrono::NaiveDate;

/// Assign `allocate(len)` positionally and derive every amount from `total`.
///
/// Ids, names, levels and join dates are left as they are.
pub fn recompute(chain: &[Participant], total: f64) -> Vec<Participant> {
    let shares = allocate(chain.len());
    chain
        .iter()
        .zip(shares)
        .map(|(p, percentage)| Participant {
            percentage,
            amount: share_of(total, percentage),
            ..p.clone()
        })
        .collect()
}

/// `"{name} (Level {level})"`.
pub fn level_name(base: &str, level: u32) -> String {
    format!("{base} (Level {level})")
}

/// Next unused id: one past the largest id in the chain.
///
/// `None` once the largest id is `u64::MAX`.
pub fn next_id(chain: &[Participant]) -> Option<u64> {
    chain
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

/// Append a participant at the tail and recompute.
///
/// Returns `None` when `name` is blank. The new participant gets
/// `level = len + 1` and a name carrying that level.
pub fn add_participant(
    chain: &[Participant],
    name: &str,
    total: f64,
    id: u64,
    joined: NaiveDate,
) -> Option<Vec<Participant>> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let level = chain.len() as u32 + 1;
    let mut next = chain.to_vec();
    next.push(Participant::joining(id, level_name(name, level), level, joined));
    Some(recompute(&next, total))
}

/// Drop the participant with `id`, renumber levels and recompute.
///
/// Returns `None` when the chain is at its minimum length or `id` is not
/// present. An unknown id skips the filter-and-renumber pass entirely; on a
/// chain already in [`renumber`] form that pass would change nothing.
pub fn remove_participant(chain: &[Participant], id: u64, total: f64) -> Option<Vec<Participant>> {
    if chain.len() <= MIN_CHAIN_LEN || !chain.iter().any(|p| p.id == id) {
        return None;
    }

    let remaining: Vec<Participant> = chain.iter().filter(|p| p.id != id).cloned().collect();
    Some(recompute(&renumber(&remaining), total))
}

/// Set every `level` to its 1-based position and rewrite the level suffix
/// of each name to match.
///
/// Founder names keep their text; their `level` is still renumbered.
pub fn renumber(chain: &[Participant]) -> Vec<Participant> {
    chain
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let level = index as u32 + 1;
            let name = if p.is_founder() {
                p.name.clone()
            } else {
                level_name(p.base_name(), level)
            };
            Participant {
                name,
                level,
                ..p.clone()
            }
        })
        .collect()
}

/// Reasons a stored chain cannot be used as-is.
pub fn validate_snapshot(chain: &[Participant]) -> Result<(), String> {
    if chain.len() < MIN_CHAIN_LEN {
        return Err("empty chain".into());
    }
    let mut seen = HashSet::with_capacity(chain.len());
    for p in chain {
        if p.id == u64::MAX {
            return Err("participant id space exhausted".into());
        }
        if !seen.insert(p.id) {
            return Err(format!("duplicate participant id {}", p.id));
        }
    }
    Ok(())
}
