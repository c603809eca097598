//! sortnet: oblivious sorting networks
//!
//! A sorting network is a fixed sequence of compare-and-swap operations
//! (comparators) that sorts every input of a given length. The sequence never
//! depends on the data, so comparators on disjoint wires can fire in
//! parallel; grouping them gives the network's layers, and the number of
//! layers is its depth.
//!
//! This crate provides:
//! - three constructions ([`build_network`]): odd-even transposition,
//!   bitonic sort and Batcher's odd-even merge sort
//! - execution ([`run`], [`run_parallel`], [`run_traced`], [`run_batch`],
//!   [`sort_padded`])
//! - verification through the 0-1 principle ([`Verifier`]), exhaustive for
//!   small networks and sampled with a caller-supplied seeded generator
//!   above a configurable cutoff
//! - a JSON interchange form `{"wire_count": n, "layers": [[[lo, hi], ...]]}`
//!
//! ```
//! use sortnet::{build_network, run, Family};
//!
//! let net = build_network(Family::Bitonic, 8).unwrap();
//! assert_eq!(net.depth(), 6);
//! let out = run(&net, &[8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
//! assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! ```
//!
//! Only these well-known constructions are produced. None of them is
//! minimal in comparator count in general, and no optimal-network search is
//! attempted.

mod builder;
mod comparator;
mod config;
mod error;
mod executor;
mod layer;
mod network;
mod stats;
mod verifier;

pub use builder::{build_network, Family};
pub use comparator::Comparator;
pub use config::{VerifierConfig, MAX_EXHAUSTIVE_CUTOFF};
pub use error::Error;
pub use executor::{
    run, run_batch, run_in_place, run_parallel, run_traced, sort_padded, ExecutionTrace, Padded,
    TraceStep,
};
pub use layer::Layer;
pub use network::Network;
pub use stats::{compare_families, known_min_comparators, NetworkStats};
pub use verifier::{check_permutations, verify, VerificationMode, VerificationResult, Verifier};

pub type Result<T> = std::result::Result<T, Error>;
