//! Error types for sortnet

use thiserror::Error;

use crate::builder::Family;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid wire count {n} for {family}: {reason}")]
    InvalidWireCount {
        family: Family,
        n: usize,
        reason: &'static str,
    },

    #[error("dimension mismatch: network has {expected} wires, input has {actual} values")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("a network needs at least one wire")]
    NoWires,

    #[error("wire {wire} out of range for a {wire_count}-wire network")]
    WireOutOfRange { wire: usize, wire_count: usize },

    #[error("comparator connects wire {wire} to itself")]
    DegenerateComparator { wire: usize },

    #[error("layer {layer} uses wire {wire} more than once")]
    OverlappingLayer { layer: usize, wire: usize },

    #[error("layer {layer} is empty")]
    EmptyLayer { layer: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("verification cancelled after {samples_checked} samples")]
    Cancelled { samples_checked: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
