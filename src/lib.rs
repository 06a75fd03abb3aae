// tokenflags - Bit-packed option panels as compact base32 tokens
//
// A panel binds typed controls (binary, tri-state, enumerated) to bit fields
// of a fixed-size buffer. The whole buffer round-trips through a short
// token that can be shared, stored and handed to an external engine.

// Re-export core functionality
pub use tokenflags_core::*;

// Re-export logging
pub use tokenflags_log;

// Re-export optional crates
#[cfg(feature = "config")]
pub use tokenflags_config;

#[cfg(feature = "engine")]
pub use tokenflags_engine;

// Prelude for common imports
pub mod prelude {
    pub use crate::preset::{self, CLASSIC_SIZE, DEFAULT_COSMETIC, DEFAULT_TOKEN};
    pub use crate::{
        Base32, BitFieldBuffer, Control, ControlState, EnumOption, FieldAddress, FlagError,
        Layout, Panel, Token, TriState,
    };

    #[cfg(feature = "config")]
    pub use tokenflags_config::{ConfigService, Settings, StateStore};

    #[cfg(feature = "engine")]
    pub use tokenflags_engine::{CosmeticCatalog, Engine, Invoker, Seed, SourceArtifact};
}
