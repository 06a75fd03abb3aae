//! Engine backed by an external program.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokenflags_log::debug;
use tokio::process::Command;
use tokio::sync::OnceCell;

use crate::{Engine, EngineError, RandomizeRequest, Result};

/// Runs an engine program once per call.
///
/// The program is expected to understand three subcommands:
///
/// ```text
/// <program> version
/// <program> cosmetics
/// <program> randomize <source> <seed> <token> <cosmetic> <output-dir>
/// ```
///
/// `cosmetics` prints one choice per line. `randomize` prints the file name
/// of the artifact it wrote. A non-zero exit status is a failure, with the
/// reason on stderr.
#[derive(Debug)]
pub struct CommandEngine {
    program: PathBuf,
    cosmetics: OnceCell<Vec<String>>,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cosmetics: OnceCell::new(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EngineError::Launch {
                program: self.program.display().to_string(),
                reason: e.to_string(),
            })?;

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(EngineError::Engine(message));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| EngineError::Engine(format!("Invalid UTF-8 in output: {}", e)))
    }

    async fn cosmetics(&self) -> Result<&[String]> {
        let list = self
            .cosmetics
            .get_or_try_init(|| async {
                let stdout = self.run(["cosmetics"]).await?;
                let list: Vec<String> = stdout
                    .lines()
                    .map(str::trim)
                    .take_while(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                debug!("Engine offers {} cosmetic choices", list.len());
                Ok::<_, EngineError>(list)
            })
            .await?;
        Ok(list)
    }
}

#[async_trait]
impl Engine for CommandEngine {
    async fn randomize(&self, request: &RandomizeRequest<'_>) -> Result<String> {
        let seed = request.seed.to_string();
        let stdout = self
            .run([
                OsStr::new("randomize"),
                request.source.as_os_str(),
                OsStr::new(&seed),
                OsStr::new(request.token),
                OsStr::new(request.cosmetic),
                request.output_dir.as_os_str(),
            ])
            .await?;

        let name = stdout.lines().map(str::trim).find(|l| !l.is_empty());
        match name {
            Some(name) => Ok(name.to_string()),
            None => Err(EngineError::Engine(
                "engine did not report an output name".to_string(),
            )),
        }
    }

    async fn cosmetic_choice(&self, index: usize) -> Result<Option<String>> {
        Ok(self.cosmetics().await?.get(index).cloned())
    }

    async fn version(&self) -> Result<String> {
        Ok(self.run(["version"]).await?.trim().to_string())
    }
}
