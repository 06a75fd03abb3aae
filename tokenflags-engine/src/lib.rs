//! Engine invocation for tokenflags
//!
//! Hands a panel's token, a numeric seed and a cosmetic choice to an
//! external randomization engine and collects the artifact it writes.
//!
//! # Features
//!
//! - **Engine trait** - Async boundary any engine can implement
//! - **Process engine** - Drive an engine program through its command line
//! - **Cosmetic catalog** - Enumerate and validate cosmetic choices
//! - **Seeds** - Random seeds in the double-safe integer range
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokenflags_core::preset;
//! use tokenflags_engine::*;
//!
//! # tokio_test::block_on(async {
//! let engine = Arc::new(CommandEngine::new("dwr-engine"));
//! let invoker = Invoker::new(engine, "work", "out");
//!
//! let mut panel = preset::classic()?;
//! let source = SourceArtifact::from_path("game.nes").await?;
//! let artifact = invoker
//!     .invoke(&source, &panel.encode(), Seed::random(), RANDOM_COSMETIC)
//!     .await?;
//! println!("wrote {}", artifact.name);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```
//!
//! # Cosmetic Choices
//!
//! ```
//! use tokenflags_engine::{CosmeticCatalog, EngineError};
//!
//! let catalog = CosmeticCatalog::new(vec!["Knight".to_string()]);
//! assert!(catalog.validate("Knight").is_ok());
//! assert!(catalog.validate("Random").is_ok());
//! assert!(matches!(catalog.validate("Ghost"), Err(EngineError::UnknownCosmetic(_))));
//! ```

pub mod artifact;
pub mod command;
pub mod cosmetic;
pub mod engine;
pub mod error;
pub mod invoker;
pub mod seed;

pub use artifact::{Artifact, HEADER_LEN, SourceArtifact};
pub use command::CommandEngine;
pub use cosmetic::{CosmeticCatalog, RANDOM_COSMETIC};
pub use engine::{Engine, RandomizeRequest};
pub use error::{EngineError, Result};
pub use invoker::Invoker;
pub use seed::{MAX_RANDOM_SEED, Seed};
