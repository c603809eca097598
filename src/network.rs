//! The layered network model and its JSON interchange form.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comparator::Comparator;
use crate::layer::Layer;
use crate::{Error, Result};

/// An immutable, oblivious comparator network on `wire_count` wires.
///
/// Every comparator references wires `< wire_count`, every layer is
/// non-empty and disjoint. Those invariants are checked once, when the
/// network is built or deserialized, and hold for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    wire_count: usize,
    layers: Vec<Layer>,
}

/// Wire form before validation.
#[derive(Deserialize)]
struct RawNetwork {
    wire_count: usize,
    layers: Vec<Vec<(usize, usize)>>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = Error;

    fn try_from(raw: RawNetwork) -> Result<Self> {
        let layers = raw
            .layers
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .map(Comparator::try_from)
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Network::new(raw.wire_count, layers)
    }
}

impl Network {
    /// Build a network from an explicit layer partition.
    pub fn new(wire_count: usize, layers: Vec<Vec<Comparator>>) -> Result<Self> {
        if wire_count == 0 {
            return Err(Error::NoWires);
        }
        let layers = layers
            .into_iter()
            .enumerate()
            .map(|(index, comparators)| {
                let layer = Layer::new(index, comparators)?;
                match layer.max_wire() {
                    Some(wire) if wire >= wire_count => {
                        Err(Error::WireOutOfRange { wire, wire_count })
                    }
                    _ => Ok(layer),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { wire_count, layers })
    }

    /// Pack a flat comparator sequence into layers greedily (see [`Schedule`]).
    pub fn from_comparators<I>(wire_count: usize, comparators: I) -> Result<Self>
    where
        I: IntoIterator<Item = Comparator>,
    {
        if wire_count == 0 {
            return Err(Error::NoWires);
        }
        let mut schedule = Schedule::new(wire_count);
        for c in comparators {
            let wire = c.max_wire();
            if wire >= wire_count {
                return Err(Error::WireOutOfRange { wire, wire_count });
            }
            schedule.push(c);
        }
        Ok(schedule.finish())
    }

    pub fn wire_count(&self) -> usize {
        self.wire_count
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of parallel steps.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn comparator_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// All comparators in execution order.
    pub fn comparators(&self) -> impl Iterator<Item = &Comparator> + '_ {
        self.layers.iter().flat_map(Layer::iter)
    }

    /// True if every comparator moves the minimum to the lower index.
    pub fn is_standard(&self) -> bool {
        self.comparators().all(Comparator::is_standard)
    }

    /// Greedy critical-path depth of the flattened comparator sequence.
    /// Never exceeds [`depth`](Self::depth); equal for networks packed by
    /// [`Schedule`].
    pub fn critical_path_depth(&self) -> usize {
        let mut wire_times = vec![0usize; self.wire_count];
        let mut max_depth = 0usize;
        for c in self.comparators() {
            let t = wire_times[c.lo()].max(wire_times[c.hi()]) + 1;
            wire_times[c.lo()] = t;
            wire_times[c.hi()] = t;
            max_depth = max_depth.max(t);
        }
        max_depth
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate. Syntax errors come back as [`Error::Json`],
    /// invariant violations as their own variants.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawNetwork = serde_json::from_str(json)?;
        Network::try_from(raw)
    }

    /// Save the network to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Load and validate a network from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

/// Accumulates comparators into layers as early as their wires allow.
///
/// A comparator lands in layer `max(ready[lo], ready[hi])`, after which both
/// wires are busy until the next layer. Comparators sharing a wire keep
/// their relative order, so the packed network computes exactly what the
/// flat sequence computes.
#[derive(Debug)]
pub(crate) struct Schedule {
    ready: Vec<usize>,
    layers: Vec<Vec<Comparator>>,
}

impl Schedule {
    pub(crate) fn new(wire_count: usize) -> Self {
        Self {
            ready: vec![0; wire_count],
            layers: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, c: Comparator) {
        let t = self.ready[c.lo()].max(self.ready[c.hi()]);
        if t == self.layers.len() {
            self.layers.push(Vec::new());
        }
        self.layers[t].push(c);
        self.ready[c.lo()] = t + 1;
        self.ready[c.hi()] = t + 1;
    }

    pub(crate) fn finish(self) -> Network {
        Network {
            wire_count: self.ready.len(),
            layers: self.layers.into_iter().map(Layer::from_disjoint).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(lo: usize, hi: usize) -> Comparator {
        Comparator::new(lo, hi).unwrap()
    }

    #[test]
    fn test_schedule_packs_independent_comparators() {
        // Flat Batcher order for four wires.
        let flat = [comp(0, 1), comp(2, 3), comp(0, 2), comp(1, 3), comp(1, 2)];
        let net = Network::from_comparators(4, flat).unwrap();
        assert_eq!(net.depth(), 3);
        assert_eq!(net.comparator_count(), 5);
        assert_eq!(net.layers()[0].comparators(), &[comp(0, 1), comp(2, 3)]);
        assert_eq!(net.layers()[2].comparators(), &[comp(1, 2)]);
        assert_eq!(net.critical_path_depth(), 3);
    }

    #[test]
    fn test_new_rejects_out_of_range_wire() {
        let err = Network::new(3, vec![vec![comp(0, 3)]]).unwrap_err();
        assert!(matches!(err, Error::WireOutOfRange { wire: 3, wire_count: 3 }));
        let err = Network::from_comparators(2, [comp(5, 0)]).unwrap_err();
        assert!(matches!(err, Error::WireOutOfRange { wire: 5, wire_count: 2 }));
    }

    #[test]
    fn test_new_labels_offending_layer() {
        let err = Network::new(4, vec![vec![comp(0, 1)], vec![comp(1, 2), comp(2, 3)]])
            .unwrap_err();
        assert!(matches!(err, Error::OverlappingLayer { layer: 1, wire: 2 }));
    }

    #[test]
    fn test_zero_wires_rejected() {
        assert!(matches!(Network::new(0, Vec::new()), Err(Error::NoWires)));
        assert!(matches!(
            Network::from_comparators(0, std::iter::empty()),
            Err(Error::NoWires)
        ));
        assert!(matches!(
            Network::from_json(r#"{"wire_count":0,"layers":[]}"#),
            Err(Error::NoWires)
        ));
    }

    #[test]
    fn test_from_json_keeps_error_variant() {
        assert!(matches!(
            Network::from_json(r#"{"wire_count":2,"layers":[[[0,2]]]}"#),
            Err(Error::WireOutOfRange { wire: 2, wire_count: 2 })
        ));
        assert!(matches!(
            Network::from_json(r#"{"wire_count":3,"layers":[[[1,1]]]}"#),
            Err(Error::DegenerateComparator { wire: 1 })
        ));
        assert!(matches!(
            Network::from_json(r#"{"wire_count":2,"layers":[[[0,1]"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_critical_path_below_declared_depth() {
        // Two independent comparators spread over two layers.
        let net = Network::new(4, vec![vec![comp(0, 1)], vec![comp(2, 3)]]).unwrap();
        assert_eq!(net.depth(), 2);
        assert_eq!(net.critical_path_depth(), 1);
    }

    #[test]
    fn test_json_shape() {
        let net = Network::new(3, vec![vec![comp(0, 1)], vec![comp(2, 1)]]).unwrap();
        assert_eq!(
            net.to_json().unwrap(),
            r#"{"wire_count":3,"layers":[[[0,1]],[[2,1]]]}"#
        );
        assert!(!net.is_standard());
    }
}
