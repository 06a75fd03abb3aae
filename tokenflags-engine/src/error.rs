//! Engine error types.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors from invoking the external engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine itself reported a failure. The message is passed through
    /// as the engine produced it.
    #[error("Engine failed: {0}")]
    Engine(String),

    /// The engine could not be started.
    #[error("Failed to launch engine '{program}': {reason}")]
    Launch { program: String, reason: String },

    /// The cosmetic choice is not offered by the engine.
    #[error("Unknown cosmetic choice: {0}")]
    UnknownCosmetic(String),

    /// A seed could not be parsed.
    #[error("Invalid seed '{0}': expected an unsigned integer")]
    InvalidSeed(String),

    /// No source artifact was provided.
    #[error("No source artifact loaded")]
    MissingSource,

    /// The engine named an output that does not exist.
    #[error("Output artifact not found: {0}")]
    MissingOutput(String),

    /// I/O error while staging or collecting artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Check if the failure came from the engine rather than the adapter.
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Self::Engine(_) | Self::Launch { .. })
    }
}
