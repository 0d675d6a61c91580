//! Participant records and chain summaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{FOUNDER_MARKER, LEVEL_MARKER};

/// One member of a referral chain.
///
/// `level`, `percentage` and `amount` are derived from the participant's
/// position and the current total; they are rewritten on every mutation
/// of the chain. `id` and `joined_date` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Unique identifier, fixed at creation.
    pub id: u64,
    /// Display name, usually carrying a `" (Level N)"` or `"(Founder)"` suffix.
    pub name: String,
    /// 1-based position in the chain.
    pub level: u32,
    /// Whole-percent share of the total.
    pub percentage: u8,
    /// `total * percentage / 100`.
    pub amount: f64,
    /// Date the participant joined. Serialized as `YYYY-MM-DD`.
    pub joined_date: NaiveDate,
}

impl Participant {
    /// A freshly joined participant with placeholder share and amount.
    pub fn joining(id: u64, name: String, level: u32, joined_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            level,
            percentage: 0,
            amount: 0.0,
            joined_date,
        }
    }

    /// Whether the name carries the founder marker.
    pub fn is_founder(&self) -> bool {
        self.name.contains(FOUNDER_MARKER)
    }

    /// Name with any `" (Level N)"` suffix removed.
    pub fn base_name(&self) -> &str {
        match self.name.find(LEVEL_MARKER) {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

/// Display tier by chain position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Head of the chain.
    Gold,
    /// Second position.
    Silver,
    /// Everyone else.
    Bronze,
}

impl Tier {
    /// Tier for a 0-based chain index.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Self::Gold,
            1 => Self::Silver,
            _ => Self::Bronze,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

/// Aggregate view of one distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    /// Amount being split.
    pub total: f64,
    /// Number of participants receiving a share.
    pub participant_count: usize,
    /// Sum of all participant amounts.
    pub distributed: f64,
}

impl DistributionSummary {
    /// Summarize a chain at a given total.
    pub fn of(chain: &[Participant], total: f64) -> Self {
        Self {
            total,
            participant_count: chain.len(),
            distributed: chain.iter().map(|p| p.amount).sum(),
        }
    }

    /// `total - distributed`. Zero up to floating-point error for a
    /// recomputed chain.
    pub fn undistributed(&self) -> f64 {
        self.total - self.distributed
    }
}
