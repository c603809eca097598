//! The compare-and-swap primitive.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A compare-and-swap between two wires.
///
/// After the comparator fires, wire `lo` holds the smaller of the two values
/// and wire `hi` the larger. `lo` need not be the smaller *index*: bitonic
/// networks use descending comparators with `lo > hi`.
///
/// Serialized as the pair `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Comparator {
    lo: usize,
    hi: usize,
}

impl Comparator {
    pub fn new(lo: usize, hi: usize) -> Result<Self> {
        if lo == hi {
            return Err(Error::DegenerateComparator { wire: lo });
        }
        Ok(Self { lo, hi })
    }

    /// Comparator moving the smaller value to the lower index when
    /// `ascending`, to the higher index otherwise.
    pub(crate) fn oriented(a: usize, b: usize, ascending: bool) -> Self {
        debug_assert_ne!(a, b);
        let (min, max) = if a < b { (a, b) } else { (b, a) };
        if ascending {
            Self { lo: min, hi: max }
        } else {
            Self { lo: max, hi: min }
        }
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    /// Both wires, in `(lo, hi)` order.
    pub fn wires(&self) -> [usize; 2] {
        [self.lo, self.hi]
    }

    pub fn max_wire(&self) -> usize {
        self.lo.max(self.hi)
    }

    /// True when the smaller value goes to the lower index.
    pub fn is_standard(&self) -> bool {
        self.lo < self.hi
    }

    pub fn touches(&self, wire: usize) -> bool {
        self.lo == wire || self.hi == wire
    }

    /// Whether this comparator would swap the given pair of values.
    #[inline]
    pub fn out_of_order<T: Ord>(&self, v: &[T]) -> bool {
        v[self.lo] > v[self.hi]
    }

    /// Compare-and-swap in place. Ties are left alone.
    #[inline]
    pub fn apply<T: Ord>(&self, v: &mut [T]) {
        if v[self.lo] > v[self.hi] {
            v.swap(self.lo, self.hi);
        }
    }
}

impl TryFrom<(usize, usize)> for Comparator {
    type Error = Error;

    fn try_from((lo, hi): (usize, usize)) -> Result<Self> {
        Self::new(lo, hi)
    }
}

impl From<Comparator> for (usize, usize) {
    fn from(c: Comparator) -> Self {
        (c.lo, c.hi)
    }
}
