//! Cosmetics command - list the engine's cosmetic choices.

use colored::Colorize;
use std::path::PathBuf;
use tokenflags_engine::{CommandEngine, CosmeticCatalog, Engine, RANDOM_COSMETIC};

use super::{GlobalOptions, Session};
use crate::error::{CliError, CliResult};

pub async fn run(options: &GlobalOptions, engine: Option<PathBuf>) -> CliResult<()> {
    let session = Session::open(options)?;
    let engine = CommandEngine::new(resolve_engine(&session, engine)?);

    let version = engine.version().await?;
    let catalog = CosmeticCatalog::load(&engine).await?;
    session.info(&format!("Engine {}", version));

    println!("{}", RANDOM_COSMETIC);
    for choice in catalog.iter() {
        if choice == session.settings.default_cosmetic {
            println!("{} {}", choice, "(default)".dimmed());
        } else {
            println!("{}", choice);
        }
    }
    Ok(())
}

/// The engine named on the command line, else the configured one.
pub fn resolve_engine(session: &Session, explicit: Option<PathBuf>) -> CliResult<PathBuf> {
    explicit
        .or_else(|| session.settings.engine.clone())
        .ok_or_else(|| {
            CliError::InvalidArgument(
                "no engine configured; pass --engine or set TOKENFLAGS_ENGINE".to_string(),
            )
        })
}
