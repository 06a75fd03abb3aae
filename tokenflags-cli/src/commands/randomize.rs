//! Randomize command - hand the current token to the engine.

use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tokenflags_engine::{
    CommandEngine, CosmeticCatalog, EngineError, Invoker, Seed, SourceArtifact,
};

use super::cosmetics::resolve_engine;
use super::{GlobalOptions, Session};
use crate::error::CliResult;

/// Arguments of one randomize run.
#[derive(Debug, Default)]
pub struct Request {
    pub engine: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub seed: Option<String>,
    pub cosmetic: Option<String>,
}

pub async fn run(options: &GlobalOptions, request: Request) -> CliResult<()> {
    let mut session = Session::open(options)?;
    session.load_token(None);
    let token = session.commit()?;

    let source = match request.source {
        Some(ref path) => {
            let source = SourceArtifact::from_path(path).await?;
            session.state.set_source(source.name(), source.data())?;
            source
        }
        None => match session.state.source()? {
            Some(stored) => SourceArtifact::new(stored.name, stored.data),
            None => return Err(EngineError::MissingSource.into()),
        },
    };

    let seed = match request.seed {
        Some(ref text) => text.parse::<Seed>()?,
        None => Seed::random(),
    };

    let cosmetic = request
        .cosmetic
        .or_else(|| session.state.cosmetic().map(str::to_string))
        .unwrap_or_else(|| session.settings.default_cosmetic.clone());

    let engine = Arc::new(CommandEngine::new(resolve_engine(&session, request.engine)?));
    CosmeticCatalog::load(engine.as_ref())
        .await?
        .validate(&cosmetic)?;
    session.state.set_cosmetic(&cosmetic)?;

    let invoker = Invoker::new(
        engine,
        session.settings.work_dir.clone(),
        session.settings.output_dir.clone(),
    );
    let artifact = invoker.invoke(&source, &token, seed, &cosmetic).await?;

    let path = session.settings.output_dir.join(&artifact.name);
    session.info(&format!(
        "{} {} {} {}",
        "Seed".dimmed(),
        seed,
        "Flags".dimmed(),
        token
    ));
    session.success(&format!("Wrote {} ({} bytes)", path.display(), artifact.data.len()));
    if options.quiet {
        println!("{}", path.display());
    }
    Ok(())
}
