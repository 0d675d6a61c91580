//! Text rendering helpers for chain listings.

use chainsplit_core::types::{Participant, Tier};

/// Amount with two decimals, e.g. `$500.00`.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Share as shown next to an amount, e.g. `50% of total`.
pub fn format_share(percentage: u8) -> String {
    format!("{percentage}% of total")
}

/// One hierarchy node: level, first name and share, e.g. `1 John 50%`.
fn node(p: &Participant) -> String {
    let first = p.name.split_whitespace().next().unwrap_or_default();
    format!("{} {} {}%", p.level, first, p.percentage)
}

/// Path through the chain, e.g. `1 John 50% → 2 Sarah 30% → 3 Mike 20%`.
pub fn hierarchy_path(chain: &[Participant]) -> String {
    chain.iter().map(node).collect::<Vec<_>>().join(" → ")
}

/// Hierarchy path with each node's tier, e.g. `1 John 50% [gold] → 2 Sarah 30% [silver]`.
pub fn tiered_path(chain: &[Participant]) -> String {
    chain
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} [{}]", node(p), Tier::for_index(i).label()))
        .collect::<Vec<_>>()
        .join(" → ")
}
