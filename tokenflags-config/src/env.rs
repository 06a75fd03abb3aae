//! Environment variable loading.

use crate::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Reads `PREFIX_KEY` variables as lower-case `key` entries.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load matching variables from the process environment.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.load_from(env::vars()))
    }

    /// Load matching variables from an explicit list of pairs.
    pub fn load_from<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match self.prefix {
                Some(ref prefix) => {
                    let stripped = key
                        .strip_prefix(prefix.as_str())
                        .and_then(|rest| rest.strip_prefix('_'));
                    if let Some(name) = stripped.filter(|name| !name.is_empty()) {
                        config.insert(name.to_lowercase(), value);
                    }
                }
                None => {
                    config.insert(key.to_lowercase(), value);
                }
            }
        }

        config
    }

    /// Load a single variable, applying the prefix.
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Variable name for `key`, e.g. `TOKENFLAGS_FLAG_BYTES` for `flag_bytes`.
    pub fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Read an environment string as a number or boolean, if it is one.
///
/// Environment values are stored as strings; this is the second reading
/// tried when a string does not deserialize into the requested type.
pub fn scalar_value(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_is_stripped() {
        let loader = EnvLoader::new(Some("TOKENFLAGS".to_string()));
        let vars = loader.load_from(pairs(&[
            ("TOKENFLAGS_FLAG_BYTES", "15"),
            ("TOKENFLAGS_ENGINE", "/usr/bin/dwr"),
            ("TOKENFLAGSX_OTHER", "no"),
            ("TOKENFLAGS_", "empty"),
            ("HOME", "/root"),
        ]));

        assert_eq!(vars.len(), 2);
        assert_eq!(vars["flag_bytes"], "15");
        assert_eq!(vars["engine"], "/usr/bin/dwr");
    }

    #[test]
    fn test_no_prefix_keeps_everything() {
        let loader = EnvLoader::default();
        let vars = loader.load_from(pairs(&[("PATH", "/bin"), ("Mixed_Case", "x")]));
        assert_eq!(vars["path"], "/bin");
        assert_eq!(vars["mixed_case"], "x");
    }

    #[test]
    fn test_full_key() {
        let loader = EnvLoader::new(Some("TOKENFLAGS".to_string()));
        assert_eq!(loader.full_key("flag_bytes"), "TOKENFLAGS_FLAG_BYTES");
        assert_eq!(EnvLoader::default().full_key("path"), "PATH");
    }

    #[test]
    fn test_missing_var() {
        let loader = EnvLoader::new(Some("TOKENFLAGS_TEST".to_string()));
        assert!(loader.load_var("MISSING_VAR_67890").is_err());
        assert_eq!(loader.load_var_or("MISSING_VAR_67890", "fallback"), "fallback");
    }

    #[test]
    fn test_scalar_value() {
        assert_eq!(scalar_value("15"), Some(Value::from(15)));
        assert_eq!(scalar_value(" true "), Some(Value::Bool(true)));
        assert_eq!(scalar_value("Random"), None);
        assert_eq!(scalar_value("[1, 2]"), None);
    }
}
