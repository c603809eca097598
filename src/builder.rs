//! Network constructions.
//!
//! Every construction emits comparators in its natural recursive order into a
//! [`Schedule`], which packs them into the shallowest layering that keeps the
//! per-wire order. The three families:
//!
//! - odd-even transposition: any `n`, depth `n` (`n ≥ 3`), `n(n-1)/2` comparators
//! - bitonic sort: `n = 2^k`, depth `k(k+1)/2`, `n·k(k+1)/4` comparators
//! - Batcher's odd-even merge sort: `n = 2^k`, depth `k(k+1)/2`, fewer
//!   comparators than bitonic for `n ≥ 4`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::comparator::Comparator;
use crate::network::{Network, Schedule};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    OddEvenTransposition,
    Bitonic,
    BatcherOddEvenMerge,
}

impl Family {
    pub const ALL: [Family; 3] = [
        Family::OddEvenTransposition,
        Family::Bitonic,
        Family::BatcherOddEvenMerge,
    ];

    pub fn requires_power_of_two(self) -> bool {
        !matches!(self, Family::OddEvenTransposition)
    }

    /// Whether `n` wires can be built directly, without padding.
    pub fn supports(self, n: usize) -> bool {
        n > 0 && (!self.requires_power_of_two() || n.is_power_of_two())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Family::OddEvenTransposition => "odd_even_transposition",
            Family::Bitonic => "bitonic",
            Family::BatcherOddEvenMerge => "batcher_odd_even_merge",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "odd_even_transposition" | "bubble" => Ok(Family::OddEvenTransposition),
            "bitonic" => Ok(Family::Bitonic),
            "batcher_odd_even_merge" | "batcher" => Ok(Family::BatcherOddEvenMerge),
            other => Err(format!("unknown network family: {other}")),
        }
    }
}

/// Build the `family` network on `n` wires.
pub fn build_network(family: Family, n: usize) -> Result<Network> {
    if n == 0 {
        return Err(Error::InvalidWireCount {
            family,
            n,
            reason: "a network needs at least one wire",
        });
    }
    if family.requires_power_of_two() && !n.is_power_of_two() {
        return Err(Error::InvalidWireCount {
            family,
            n,
            reason: "wire count must be a power of two",
        });
    }

    let mut schedule = Schedule::new(n);
    match family {
        Family::OddEvenTransposition => odd_even_transposition(&mut schedule, n),
        Family::Bitonic => bitonic_sort(&mut schedule, 0, n, true),
        Family::BatcherOddEvenMerge => odd_even_merge_sort(&mut schedule, 0, n - 1),
    }
    let network = schedule.finish();

    tracing::debug!(
        %family,
        n,
        depth = network.depth(),
        comparators = network.comparator_count(),
        "built sorting network"
    );
    Ok(network)
}

/// Round `k` compares `(i, i+1)` for every `i ≡ k (mod 2)`.
fn odd_even_transposition(schedule: &mut Schedule, n: usize) {
    for k in 0..n {
        let mut i = k % 2;
        while i + 1 < n {
            schedule.push(Comparator::oriented(i, i + 1, true));
            i += 2;
        }
    }
}

/// Sort `[lo, lo+cnt)` in direction `ascending`: sort the halves in opposite
/// directions, giving a bitonic sequence, then merge.
fn bitonic_sort(schedule: &mut Schedule, lo: usize, cnt: usize, ascending: bool) {
    if cnt > 1 {
        let k = cnt / 2;
        bitonic_sort(schedule, lo, k, true);
        bitonic_sort(schedule, lo + k, k, false);
        bitonic_merge(schedule, lo, cnt, ascending);
    }
}

/// Half-cleaner on a bitonic `[lo, lo+cnt)`, then recurse on both halves.
fn bitonic_merge(schedule: &mut Schedule, lo: usize, cnt: usize, ascending: bool) {
    if cnt > 1 {
        let k = cnt / 2;
        for i in lo..lo + k {
            schedule.push(Comparator::oriented(i, i + k, ascending));
        }
        bitonic_merge(schedule, lo, k, ascending);
        bitonic_merge(schedule, lo + k, k, ascending);
    }
}

/// Sort the inclusive range `[lo, hi]`.
fn odd_even_merge_sort(schedule: &mut Schedule, lo: usize, hi: usize) {
    if lo < hi {
        let mid = lo + (hi - lo) / 2;
        odd_even_merge_sort(schedule, lo, mid);
        odd_even_merge_sort(schedule, mid + 1, hi);
        odd_even_merge(schedule, lo, hi, 1);
    }
}

/// Merge the two sorted halves of `[lo, hi]`, looking only at every
/// `step`-th wire starting from `lo`.
fn odd_even_merge(schedule: &mut Schedule, lo: usize, hi: usize, step: usize) {
    let span = hi - lo + 1;
    if step >= span {
        return;
    }
    let double = step * 2;
    if double < span {
        odd_even_merge(schedule, lo, hi, double);
        odd_even_merge(schedule, lo + step, hi, double);
        let mut i = lo + step;
        while i + step <= hi {
            schedule.push(Comparator::oriented(i, i + step, true));
            i += double;
        }
    } else {
        schedule.push(Comparator::oriented(lo, lo + step, true));
    }
}
