//! Invocation adapter: one engine call per request.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokenflags_core::Token;
use tokenflags_log::{debug, error, info};
use tokio::fs;

use crate::{Artifact, Engine, EngineError, RandomizeRequest, Result, Seed, SourceArtifact};

/// File name used when the source artifact carries no name.
const FALLBACK_SOURCE_NAME: &str = "source.bin";

/// Passes a token, seed and cosmetic choice to an engine and collects the
/// artifact it produces.
///
/// Engine failures are returned as the engine reported them. Nothing is
/// retried, and concurrent invocations are not serialized.
#[derive(Clone)]
pub struct Invoker {
    engine: Arc<dyn Engine>,
    work_dir: PathBuf,
    output_dir: PathBuf,
}

impl Invoker {
    pub fn new(
        engine: Arc<dyn Engine>,
        work_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            work_dir: work_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Stage `source`, run the engine once and read back its output.
    pub async fn invoke(
        &self,
        source: &SourceArtifact,
        token: &Token,
        seed: Seed,
        cosmetic: &str,
    ) -> Result<Artifact> {
        if source.is_empty() {
            return Err(EngineError::MissingSource);
        }

        let staged = self.stage(source).await?;
        fs::create_dir_all(&self.output_dir).await?;

        info!(
            "Randomizing {} (seed {}, flags {}, cosmetic {})",
            source.name(),
            seed,
            token,
            cosmetic
        );

        let request = RandomizeRequest {
            source: &staged,
            seed,
            token: token.as_str(),
            cosmetic,
            output_dir: &self.output_dir,
        };

        let name = match self.engine.randomize(&request).await {
            Ok(name) => name,
            Err(e) => {
                error!("Engine failed for seed {}: {}", seed, e);
                return Err(e);
            }
        };

        let path = self.output_dir.join(&name);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(EngineError::MissingOutput(name));
            }
            Err(e) => return Err(e.into()),
        };

        info!("Wrote {} ({} bytes)", name, data.len());
        Ok(Artifact {
            name,
            data: data.into(),
        })
    }

    async fn stage(&self, source: &SourceArtifact) -> Result<PathBuf> {
        fs::create_dir_all(&self.work_dir).await?;
        let name = if source.name().is_empty() {
            FALLBACK_SOURCE_NAME
        } else {
            source.name()
        };
        let path = self.work_dir.join(name);
        fs::write(&path, source.data()).await?;
        debug!("Staged source at {}", path.display());
        Ok(path)
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("work_dir", &self.work_dir)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}
