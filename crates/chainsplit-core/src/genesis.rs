//! Default chain used when no snapshot is stored.

use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;
use crate::types::Participant;

/// `(id, name, level, percentage, joined)` for each seeded participant.
const SEED: [(u64, &str, u32, u8, &str); 3] = [
    (1, "John (Founder)", 1, 50, "2024-01-01"),
    (2, "Sarah (Level 2)", 2, 30, "2024-02-15"),
    (3, "Mike (Level 3)", 3, 20, "2024-03-20"),
];

fn seed_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).expect("seed dates are hardcoded valid data")
}

/// The three-participant seed chain. Amounts are zero until recomputed.
pub fn default_chain() -> Vec<Participant> {
    SEED.iter()
        .map(|&(id, name, level, percentage, joined)| Participant {
            id,
            name: name.to_string(),
            level,
            percentage,
            amount: 0.0,
            joined_date: seed_date(joined),
        })
        .collect()
}
