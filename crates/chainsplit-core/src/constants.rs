//! Allocation and naming constants. All shares are whole percentages.

/// Sum of every participant's share in a non-empty chain.
pub const PERCENT_TOTAL: u8 = 100;

/// Share assigned to the head of a chain of three or more.
pub const HEAD_SHARE: u8 = 50;

/// Interior participants take `remaining * DECAY_NUMERATOR / DECAY_DENOMINATOR`.
///
/// Integer form of `floor(remaining * 0.6)`. Both agree for every
/// `remaining` in `0..=100`.
pub const DECAY_NUMERATOR: u32 = 6;

/// See [`DECAY_NUMERATOR`].
pub const DECAY_DENOMINATOR: u32 = 10;

/// Fixed split for a two-party chain. Does not follow the decay rule.
pub const TWO_PARTY_SPLIT: [u8; 2] = [70, 30];

/// Smallest chain length. Removal below this is refused.
pub const MIN_CHAIN_LEN: usize = 1;

/// Names containing this marker keep their text when levels are renumbered.
pub const FOUNDER_MARKER: &str = "(Founder)";

/// Prefix of the level suffix embedded in non-founder names.
pub const LEVEL_MARKER: &str = " (Level";

/// Default storage key holding the serialized chain.
pub const DEFAULT_STORE_KEY: &str = "referral_chain";

/// Default amount to distribute.
pub const DEFAULT_TOTAL: f64 = 1000.0;

/// Calendar date format for `joinedDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
