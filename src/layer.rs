//! A single parallel step of a network.

use serde::Serialize;

use crate::comparator::Comparator;
use crate::{Error, Result};

/// Comparators with pairwise disjoint wires. Every comparator of a layer can
/// fire at the same time without read/write conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Layer {
    comparators: Vec<Comparator>,
}

impl Layer {
    /// Build a layer, checking disjointness. `index` is only used to label
    /// the error.
    pub fn new(index: usize, comparators: Vec<Comparator>) -> Result<Self> {
        if comparators.is_empty() {
            return Err(Error::EmptyLayer { layer: index });
        }
        if let Some(wire) = first_shared_wire(&comparators) {
            return Err(Error::OverlappingLayer { layer: index, wire });
        }
        Ok(Self { comparators })
    }

    /// Caller guarantees the comparators are non-empty and disjoint.
    pub(crate) fn from_disjoint(comparators: Vec<Comparator>) -> Self {
        debug_assert!(!comparators.is_empty());
        debug_assert!(first_shared_wire(&comparators).is_none());
        Self { comparators }
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comparator> {
        self.comparators.iter()
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    pub fn max_wire(&self) -> Option<usize> {
        self.comparators.iter().map(Comparator::max_wire).max()
    }

    /// Apply every comparator of the layer, in emission order.
    pub fn apply<T: Ord>(&self, v: &mut [T]) {
        for c in &self.comparators {
            c.apply(v);
        }
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Comparator;
    type IntoIter = std::slice::Iter<'a, Comparator>;

    fn into_iter(self) -> Self::IntoIter {
        self.comparators.iter()
    }
}

fn first_shared_wire(comparators: &[Comparator]) -> Option<usize> {
    let span = comparators.iter().map(Comparator::max_wire).max()? + 1;
    let mut used = vec![false; span];
    for c in comparators {
        for w in c.wires() {
            if used[w] {
                return Some(w);
            }
            used[w] = true;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(lo: usize, hi: usize) -> Comparator {
        Comparator::new(lo, hi).unwrap()
    }

    #[test]
    fn test_disjoint_layer_accepted() {
        let layer = Layer::new(0, vec![comp(0, 1), comp(3, 2), comp(4, 7)]).unwrap();
        assert_eq!(layer.len(), 3);
        assert_eq!(layer.max_wire(), Some(7));
    }

    #[test]
    fn test_overlapping_layer_rejected() {
        let err = Layer::new(4, vec![comp(0, 1), comp(1, 2)]).unwrap_err();
        assert!(matches!(err, Error::OverlappingLayer { layer: 4, wire: 1 }));
    }

    #[test]
    fn test_empty_layer_rejected() {
        assert!(matches!(
            Layer::new(2, Vec::new()),
            Err(Error::EmptyLayer { layer: 2 })
        ));
    }

    #[test]
    fn test_apply_layer() {
        let layer = Layer::new(0, vec![comp(0, 1), comp(2, 3)]).unwrap();
        let mut v = [2, 1, 4, 3];
        layer.apply(&mut v);
        assert_eq!(v, [1, 2, 3, 4]);
    }
}
