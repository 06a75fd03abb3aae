//! Application settings.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::{ConfigValidator, Result, Validate};

/// Number of flag bytes in the classic panel.
pub const DEFAULT_FLAG_BYTES: usize = 15;

/// Largest panel the settings accept.
pub const MAX_FLAG_BYTES: usize = tokenflags_core::MAX_BUFFER_LEN;

/// Settings read from the environment and configuration files.
///
/// Every field has a default, so an empty configuration is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where persisted session state lives.
    pub state_file: PathBuf,
    /// Where the source artifact is staged for the engine.
    pub work_dir: PathBuf,
    /// Where the engine writes its output.
    pub output_dir: PathBuf,
    /// Engine program, if configured.
    pub engine: Option<PathBuf>,
    /// Panel size in bytes.
    #[serde(deserialize_with = "number_or_text")]
    pub flag_bytes: usize,
    pub default_cosmetic: String,
    /// Panel layout file (TOML or JSON). The classic layout when unset.
    pub layout: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(".tokenflags/state.json"),
            work_dir: PathBuf::from(".tokenflags/work"),
            output_dir: PathBuf::from("."),
            engine: None,
            flag_bytes: DEFAULT_FLAG_BYTES,
            default_cosmetic: "Random".to_string(),
            layout: None,
        }
    }
}

/// Accept `15` as well as `"15"`; environment values arrive as text.
fn number_or_text<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("flag_bytes must be a whole number, got {:?}", text))
        }),
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::in_range(self.flag_bytes, 1, MAX_FLAG_BYTES, "flag_bytes")?;
        ConfigValidator::not_empty(&self.default_cosmetic, "default_cosmetic")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.flag_bytes, 15);
        assert_eq!(settings.default_cosmetic, "Random");
        assert!(settings.engine.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"engine": "/opt/dwr"}"#).unwrap();
        assert_eq!(settings.engine, Some(PathBuf::from("/opt/dwr")));
        assert_eq!(settings.flag_bytes, DEFAULT_FLAG_BYTES);
    }

    #[test]
    fn test_flag_bytes_from_text() {
        let settings: Settings = serde_json::from_str(r#"{"flag_bytes": " 8 "}"#).unwrap();
        assert_eq!(settings.flag_bytes, 8);

        let err = serde_json::from_str::<Settings>(r#"{"flag_bytes": "lots"}"#).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_flag_bytes_bounds() {
        let mut settings = Settings::default();
        settings.flag_bytes = 0;
        assert!(settings.validate().is_err());
        settings.flag_bytes = MAX_FLAG_BYTES;
        assert!(settings.validate().is_ok());
        settings.flag_bytes = MAX_FLAG_BYTES + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_cosmetic_rejected() {
        let settings = Settings {
            default_cosmetic: String::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
