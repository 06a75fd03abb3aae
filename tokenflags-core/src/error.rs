//! Error types for flag panels.

use thiserror::Error;

/// Result type for panel and codec operations.
pub type Result<T> = std::result::Result<T, FlagError>;

/// Errors raised while building or editing a panel.
///
/// Token decoding itself never fails; [`FlagError::MalformedToken`] is only
/// produced by the explicit well-formedness checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// A field lies outside the buffer or crosses a byte boundary.
    #[error("field for '{key}' at byte {byte}, shift {shift}, width {width} does not fit a {len}-byte buffer")]
    FieldOutOfBounds {
        key: String,
        byte: usize,
        shift: u8,
        width: u8,
        len: usize,
    },

    /// Two controls claim some of the same bits.
    #[error("field for '{key}' overlaps the field of '{other}'")]
    OverlappingField { key: String, other: String },

    /// A control key is registered twice.
    #[error("duplicate control key: {0}")]
    DuplicateKey(String),

    /// No control with this key is registered.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// An enumerated control has no option with this label.
    #[error("'{key}' has no option named '{option}'")]
    UnknownOption { key: String, option: String },

    /// A textual value could not be interpreted for a control.
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },

    /// A token failed the well-formedness check.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// A panel layout description is inconsistent.
    #[error("invalid layout: {0}")]
    Layout(String),
}

impl FlagError {
    /// Check if this error comes from a token check.
    pub fn is_malformed_token(&self) -> bool {
        matches!(self, Self::MalformedToken(_))
    }

    /// Check if this error comes from field placement.
    pub fn is_placement(&self) -> bool {
        matches!(
            self,
            Self::FieldOutOfBounds { .. } | Self::OverlappingField { .. }
        )
    }
}
