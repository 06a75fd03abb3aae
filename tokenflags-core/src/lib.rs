//! Flag panels for tokenflags
//!
//! A panel is a fixed-size byte buffer plus a set of typed controls, each
//! bound to a few bits of it. The whole buffer serializes into a short,
//! shareable base32 token and back.
//!
//! # Features
//!
//! - **Bit fields** - Controls addressed by byte and bit shift
//! - **Typed controls** - Binary, tri-state and enumerated
//! - **Compact tokens** - Case-insensitive base32 without look-alike symbols
//! - **Layouts** - Panels described as TOML or JSON data
//!
//! # Quick Start
//!
//! ```
//! use tokenflags_core::*;
//!
//! let mut panel = Panel::new(1);
//! panel.register(Control::binary("music", "Music", FieldAddress::new(0, 0)))?;
//! panel.register(Control::tri_state("fast-text", "Fast Text", FieldAddress::new(0, 1)))?;
//!
//! panel.set("music", "on")?;
//! panel.set("fast-text", "indeterminate")?;
//! let token = panel.encode();
//! assert_eq!(token.as_str(), "AU");
//! # Ok::<(), FlagError>(())
//! ```
//!
//! # Applying a Token
//!
//! ```
//! use tokenflags_core::*;
//!
//! let mut panel = Panel::new(1);
//! panel.register(Control::binary("music", "Music", FieldAddress::new(0, 0)))?;
//! panel.apply("AU");
//! assert_eq!(panel.control("music").unwrap().display(), "on");
//! # Ok::<(), FlagError>(())
//! ```
//!
//! # Enumerated Controls
//!
//! ```
//! use tokenflags_core::*;
//!
//! let speed = Control::enumerated(
//!     "speed",
//!     "Leveling Speed",
//!     FieldAddress::new(0, 0),
//!     vec![
//!         EnumOption::new("Normal", 0),
//!         EnumOption::new("Fast", 1),
//!         EnumOption::new("Very Fast", 2),
//!     ],
//! );
//! assert_eq!(speed.width(), 2);
//! ```

pub mod buffer;
pub mod codec;
pub mod control;
pub mod error;
pub mod layout;
pub mod panel;
pub mod preset;

pub use buffer::{BitFieldBuffer, Field, FieldAddress, MAX_BUFFER_LEN};
pub use codec::{Base32, Token};
pub use control::{Choice, Control, ControlState, EnumOption, TriState};
pub use error::{FlagError, Result};
pub use layout::{ControlKind, LayoutControl, Layout};
pub use panel::Panel;
