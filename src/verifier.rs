//! Correctness checking through the 0-1 principle.
//!
//! A comparator network sorts every input over a totally ordered set iff it
//! sorts every 0-1 input of the same length. Thresholding values at any `t`
//! (`0` if `≤ t`, `1` otherwise) commutes with compare-and-swap, so a general
//! counterexample always induces a binary one. That replaces `n!`
//! permutations with `2^n` binary vectors: enumerated exhaustively up to
//! [`VerifierConfig::exhaustive_cutoff`] wires, sampled above it.
//!
//! A sampled pass is evidence, not proof, and is reported with
//! [`VerificationMode::Sampled`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::VerifierConfig;
use crate::executor;
use crate::network::Network;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    Exhaustive,
    Sampled,
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationMode::Exhaustive => f.write_str("exhaustive"),
            VerificationMode::Sampled => f.write_str("sampled"),
        }
    }
}

/// Outcome of a completed check. A network that fails to sort is a normal
/// result (`verified == false` with a binary counterexample), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    pub mode: VerificationMode,
    pub counterexample: Option<Vec<u8>>,
    /// Number of random vectors checked; `None` for exhaustive runs.
    pub samples_checked: Option<usize>,
}

impl VerificationResult {
    /// True only for an exhaustive pass, which is a proof of correctness.
    pub fn is_proof(&self) -> bool {
        self.verified && self.mode == VerificationMode::Exhaustive
    }
}

#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// A requested count of zero would pass without looking at a single
    /// vector; it falls back to the configured count like `None`.
    fn samples_to_draw(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|&count| count > 0)
            .unwrap_or(self.config.sample_count)
    }

    /// Check `network` exhaustively if it is at or below the cutoff, otherwise
    /// on `sample_count` (default: the configured count) vectors drawn
    /// from `rng`.
    pub fn verify<R: Rng + ?Sized>(
        &self,
        network: &Network,
        sample_count: Option<usize>,
        rng: &mut R,
    ) -> VerificationResult {
        if network.wire_count() <= self.config.exhaustive_cutoff {
            return self.exhaustive(network);
        }
        let count = self.samples_to_draw(sample_count);
        let mut buf = Vec::with_capacity(network.wire_count());
        for checked in 0..count {
            if let Some(input) = check_random_sample(network, rng, &mut buf) {
                return failed_sample(network, input, checked + 1);
            }
        }
        passed_sample(network, count)
    }

    /// [`verify`](Self::verify) with a generator seeded from
    /// [`VerifierConfig::seed`]. Repeated calls give identical results.
    pub fn verify_seeded(
        &self,
        network: &Network,
        sample_count: Option<usize>,
    ) -> VerificationResult {
        let mut rng = self.config.rng();
        self.verify(network, sample_count, &mut rng)
    }

    /// [`verify`](Self::verify), checking `cancel` before every sample.
    /// Each sample runs to completion once started. Exhaustive runs are not
    /// interrupted.
    pub fn verify_cancellable<R: Rng + ?Sized>(
        &self,
        network: &Network,
        sample_count: Option<usize>,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<VerificationResult> {
        if network.wire_count() <= self.config.exhaustive_cutoff {
            return Ok(self.exhaustive(network));
        }
        let count = self.samples_to_draw(sample_count);
        let mut buf = Vec::with_capacity(network.wire_count());
        for checked in 0..count {
            if cancel.load(Ordering::Relaxed) {
                tracing::debug!(samples_checked = checked, "verification cancelled");
                return Err(Error::Cancelled {
                    samples_checked: checked,
                });
            }
            if let Some(input) = check_random_sample(network, rng, &mut buf) {
                return Ok(failed_sample(network, input, checked + 1));
            }
        }
        Ok(passed_sample(network, count))
    }

    /// Run all `2^n` binary vectors. The counterexample reported is the
    /// failing vector with the smallest index, wire `i` taking bit `i`.
    fn exhaustive(&self, network: &Network) -> VerificationResult {
        let n = network.wire_count();
        tracing::debug!(wire_count = n, vectors = 1u64 << n, "exhaustive 0-1 check");

        let counterexample = (0..1usize << n)
            .into_par_iter()
            .map_init(
                || (vec![0u8; n], Vec::with_capacity(n)),
                |(input, buf), bits| {
                    fill_binary(input, bits);
                    (!sorts_binary(network, input, buf)).then(|| input.clone())
                },
            )
            .find_map_first(|failure| failure);

        let verified = counterexample.is_none();
        if verified {
            tracing::debug!(wire_count = n, "network sorts every 0-1 input");
        } else {
            tracing::debug!(wire_count = n, ?counterexample, "network fails a 0-1 input");
        }
        VerificationResult {
            verified,
            mode: VerificationMode::Exhaustive,
            counterexample,
            samples_checked: None,
        }
    }
}

/// Verify with the default configuration.
pub fn verify<R: Rng + ?Sized>(
    network: &Network,
    sample_count: Option<usize>,
    rng: &mut R,
) -> VerificationResult {
    Verifier::default().verify(network, sample_count, rng)
}

/// Check every permutation of `0..n`, returning the first one the network
/// fails to sort. Costs `n!` runs; meant for small `n`.
pub fn check_permutations(network: &Network) -> Option<Vec<usize>> {
    let n = network.wire_count();
    let mut perm: Vec<usize> = (0..n).collect();
    let mut buf = vec![0usize; n];
    loop {
        buf.copy_from_slice(&perm);
        let sorted = executor::run_in_place(network, &mut buf).is_ok()
            && buf.iter().enumerate().all(|(i, &v)| i == v);
        if !sorted {
            return Some(perm);
        }
        if !next_permutation(&mut perm) {
            return None;
        }
    }
}

fn fill_binary(input: &mut [u8], bits: usize) {
    for (i, slot) in input.iter_mut().enumerate() {
        *slot = ((bits >> i) & 1) as u8;
    }
}

/// Run `input` through the network in `buf` and compare against the
/// expected output, which is the zeros of `input` followed by its ones.
fn sorts_binary(network: &Network, input: &[u8], buf: &mut Vec<u8>) -> bool {
    buf.clear();
    buf.extend_from_slice(input);
    if executor::run_in_place(network, buf).is_err() {
        return false;
    }
    let zeros = input.iter().filter(|&&b| b == 0).count();
    buf[..zeros].iter().all(|&b| b == 0) && buf[zeros..].iter().all(|&b| b == 1)
}

fn check_random_sample<R: Rng + ?Sized>(
    network: &Network,
    rng: &mut R,
    buf: &mut Vec<u8>,
) -> Option<Vec<u8>> {
    let input: Vec<u8> = (0..network.wire_count())
        .map(|_| u8::from(rng.gen::<bool>()))
        .collect();
    (!sorts_binary(network, &input, buf)).then_some(input)
}

fn failed_sample(network: &Network, input: Vec<u8>, samples_checked: usize) -> VerificationResult {
    tracing::debug!(
        wire_count = network.wire_count(),
        samples_checked,
        counterexample = ?input,
        "network fails a sampled 0-1 input"
    );
    VerificationResult {
        verified: false,
        mode: VerificationMode::Sampled,
        counterexample: Some(input),
        samples_checked: Some(samples_checked),
    }
}

fn passed_sample(network: &Network, samples_checked: usize) -> VerificationResult {
    tracing::info!(
        wire_count = network.wire_count(),
        samples_checked,
        "sampled 0-1 check passed (probabilistic, not a proof)"
    );
    VerificationResult {
        verified: true,
        mode: VerificationMode::Sampled,
        counterexample: None,
        samples_checked: Some(samples_checked),
    }
}

/// Advance to the next lexicographic permutation; false after the last one.
fn next_permutation(arr: &mut [usize]) -> bool {
    let n = arr.len();
    if n <= 1 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && arr[i - 1] >= arr[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while arr[j] <= arr[i - 1] {
        j -= 1;
    }
    arr.swap(i - 1, j);
    arr[i..].reverse();
    true
}
