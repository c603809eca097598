//! Verifier configuration

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest wire count the exhaustive check may enumerate (`2^30` vectors).
pub const MAX_EXHAUSTIVE_CUTOFF: usize = 30;

/// Configuration for [`Verifier`](crate::Verifier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Networks with at most this many wires are checked on all `2^n`
    /// binary inputs
    #[serde(default = "default_exhaustive_cutoff")]
    pub exhaustive_cutoff: usize,
    /// Random binary inputs drawn above the cutoff
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Seed for [`rng`](Self::rng)
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_exhaustive_cutoff() -> usize {
    20
}

fn default_sample_count() -> usize {
    1000
}

fn default_seed() -> u64 {
    0x5EED
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            exhaustive_cutoff: default_exhaustive_cutoff(),
            sample_count: default_sample_count(),
            seed: default_seed(),
        }
    }
}

impl VerifierConfig {
    pub fn with_exhaustive_cutoff(mut self, cutoff: usize) -> Self {
        self.exhaustive_cutoff = cutoff;
        self
    }

    pub fn with_sample_count(mut self, samples: usize) -> Self {
        self.sample_count = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.exhaustive_cutoff > MAX_EXHAUSTIVE_CUTOFF {
            return Err(Error::InvalidConfig(format!(
                "exhaustive_cutoff {} exceeds {MAX_EXHAUSTIVE_CUTOFF}",
                self.exhaustive_cutoff
            )));
        }
        if self.sample_count == 0 {
            return Err(Error::InvalidConfig("sample_count must be positive".into()));
        }
        Ok(())
    }

    /// Fresh generator seeded from `seed`. Two calls give identical streams.
    pub fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
