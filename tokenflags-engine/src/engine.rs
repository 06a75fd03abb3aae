//! The engine boundary.

use async_trait::async_trait;
use std::path::Path;

use crate::{Result, Seed};

/// Everything the engine needs for one randomization.
#[derive(Debug, Clone, Copy)]
pub struct RandomizeRequest<'a> {
    /// Path of the staged source artifact.
    pub source: &'a Path,
    pub seed: Seed,
    /// Flag token, passed through untouched.
    pub token: &'a str,
    pub cosmetic: &'a str,
    /// Directory the engine writes its output into.
    pub output_dir: &'a Path,
}

/// An external randomization engine.
///
/// The engine is expected to be deterministic: the same source, seed, token
/// and cosmetic choice always produce the same output.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run the engine and return the file name of the output it wrote into
    /// `request.output_dir`.
    async fn randomize(&self, request: &RandomizeRequest<'_>) -> Result<String>;

    /// Cosmetic choice at `index`. `None` or an empty name ends the list.
    async fn cosmetic_choice(&self, index: usize) -> Result<Option<String>>;

    /// Engine version string.
    async fn version(&self) -> Result<String>;
}
