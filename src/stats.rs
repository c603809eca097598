//! Size and depth figures for comparing constructions.

use serde::{Deserialize, Serialize};

use crate::builder::{build_network, Family};
use crate::network::Network;
use crate::Result;

/// Minimum comparator counts proven optimal, indexed by `n - 1`.
/// Nothing is known to be optimal beyond twelve wires.
const KNOWN_MIN_COMPARATORS: [usize; 12] = [0, 1, 3, 5, 9, 12, 16, 19, 25, 29, 35, 39];

/// Proven minimum comparator count for `n` wires, if known.
pub fn known_min_comparators(n: usize) -> Option<usize> {
    n.checked_sub(1)
        .and_then(|i| KNOWN_MIN_COMPARATORS.get(i))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub family: Family,
    pub wire_count: usize,
    pub depth: usize,
    pub comparator_count: usize,
}

impl NetworkStats {
    pub fn of(family: Family, network: &Network) -> Self {
        Self {
            family,
            wire_count: network.wire_count(),
            depth: network.depth(),
            comparator_count: network.comparator_count(),
        }
    }

    /// Comparators above the proven minimum, where one is known.
    pub fn excess_comparators(&self) -> Option<usize> {
        known_min_comparators(self.wire_count)
            .map(|min| self.comparator_count.saturating_sub(min))
    }
}

/// Build every family at every size it supports and collect the figures.
pub fn compare_families(sizes: &[usize]) -> Result<Vec<NetworkStats>> {
    let mut rows = Vec::new();
    for &n in sizes {
        for family in Family::ALL {
            if !family.supports(n) {
                continue;
            }
            let network = build_network(family, n)?;
            rows.push(NetworkStats::of(family, &network));
        }
    }
    Ok(rows)
}
