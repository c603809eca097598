//! Running a network on concrete values.
//!
//! `run` copies the input into an owned buffer and returns it; `run_in_place`
//! works on a caller-owned slice. Either way the length is checked once per
//! call. Wire indices were already checked when the network was built.

use rayon::prelude::*;
use serde::Serialize;

use crate::builder::{build_network, Family};
use crate::comparator::Comparator;
use crate::network::Network;
use crate::{Error, Result};

/// Snapshots taken after each layer, owned by the caller that asked for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionTrace<T> {
    pub steps: Vec<TraceStep<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep<T> {
    pub layer_index: usize,
    pub values: Vec<T>,
}

fn check_len(network: &Network, actual: usize) -> Result<()> {
    if actual != network.wire_count() {
        return Err(Error::DimensionMismatch {
            expected: network.wire_count(),
            actual,
        });
    }
    Ok(())
}

fn apply_all<T: Ord>(network: &Network, values: &mut [T]) {
    for layer in network.layers() {
        layer.apply(values);
    }
}

pub fn run_in_place<T: Ord>(network: &Network, values: &mut [T]) -> Result<()> {
    check_len(network, values.len())?;
    apply_all(network, values);
    Ok(())
}

pub fn run<T: Ord + Clone>(network: &Network, input: &[T]) -> Result<Vec<T>> {
    let mut values = input.to_vec();
    run_in_place(network, &mut values)?;
    Ok(values)
}

/// Like [`run`], also recording the values after every layer.
pub fn run_traced<T: Ord + Clone>(
    network: &Network,
    input: &[T],
) -> Result<(Vec<T>, ExecutionTrace<T>)> {
    check_len(network, input.len())?;
    let mut values = input.to_vec();
    let mut steps = Vec::with_capacity(network.depth());
    for (layer_index, layer) in network.layers().iter().enumerate() {
        layer.apply(&mut values);
        steps.push(TraceStep {
            layer_index,
            values: values.clone(),
        });
    }
    Ok((values, ExecutionTrace { steps }))
}

/// Layer-synchronous execution. Within a layer every comparator decides from
/// the same read-only view of the values; the swaps are applied once the
/// whole layer has decided. Disjointness makes this equal to [`run`].
pub fn run_parallel<T>(network: &Network, input: &[T]) -> Result<Vec<T>>
where
    T: Ord + Clone + Send + Sync,
{
    check_len(network, input.len())?;
    let mut values = input.to_vec();
    for layer in network.layers() {
        let swaps: Vec<&Comparator> = layer
            .comparators()
            .par_iter()
            .filter(|c| c.out_of_order(&values))
            .collect();
        for c in swaps {
            values.swap(c.lo(), c.hi());
        }
    }
    Ok(values)
}

/// Run many independent inputs across the rayon pool. The network is shared
/// read-only; every input is its own buffer.
pub fn run_batch<T>(network: &Network, inputs: Vec<Vec<T>>) -> Result<Vec<Vec<T>>>
where
    T: Ord + Send,
{
    for input in &inputs {
        check_len(network, input.len())?;
    }
    Ok(inputs
        .into_par_iter()
        .map(|mut values| {
            apply_all(network, &mut values);
            values
        })
        .collect())
}

/// A value, or a sentinel greater than every value. Used to fill the wires
/// added when padding to a power of two.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Padded<T> {
    Value(T),
    Infinity,
}

/// Sort an input of any non-zero length with `family`.
///
/// Power-of-two families get `Infinity` sentinels appended up to the next
/// power of two. Sentinels sort to the tail, so truncating the output to the
/// input length drops exactly the padding.
pub fn sort_padded<T: Ord + Clone>(family: Family, input: &[T]) -> Result<Vec<T>> {
    let n = input.len();
    let width = if family.requires_power_of_two() && n > 0 {
        n.next_power_of_two()
    } else {
        n
    };
    let network = build_network(family, width)?;

    let mut padded: Vec<Padded<T>> = input.iter().cloned().map(Padded::Value).collect();
    padded.resize(width, Padded::Infinity);
    apply_all(&network, &mut padded);

    Ok(padded
        .into_iter()
        .take(n)
        .filter_map(|p| match p {
            Padded::Value(v) => Some(v),
            Padded::Infinity => None,
        })
        .collect())
}
