//! Numeric seeds.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EngineError;

/// Largest seed handed out by [`Seed::random`] (2^53 - 1), the largest
/// integer an IEEE-754 double holds exactly.
pub const MAX_RANDOM_SEED: u64 = (1 << 53) - 1;

/// The seed passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub u64);

impl Seed {
    /// A uniformly random seed in `0..=MAX_RANDOM_SEED`.
    pub fn random() -> Self {
        Self(rand::rng().random_range(0..=MAX_RANDOM_SEED))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for Seed {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Seed)
            .map_err(|_| EngineError::InvalidSeed(s.to_string()))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
