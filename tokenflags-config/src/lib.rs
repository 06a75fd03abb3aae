//! Settings and persisted state for tokenflags
//!
//! Settings are layered from the environment (`TOKENFLAGS_*`), an optional
//! `.env` file and JSON/TOML/env configuration files into one key/value map,
//! then deserialized into [`Settings`] and validated. Session state such as
//! the last token lives separately in a [`StateStore`].
//!
//! ```
//! use tokenflags_config::*;
//!
//! let manager = ConfigManager::new();
//! manager.set("flag_bytes", 4)?;
//! manager.set("engine", "/opt/dwr")?;
//!
//! let settings: Settings = manager.load_validated()?;
//! assert_eq!(settings.flag_bytes, 4);
//! assert_eq!(settings.default_cosmetic, "Random");
//! # Ok::<(), ConfigError>(())
//! ```

pub mod config_service;
pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod state;
pub mod validation;

pub use config_service::{ConfigService, ConfigServiceBuilder};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{DEFAULT_FLAG_BYTES, MAX_FLAG_BYTES, Settings};
pub use state::{StateStore, StoredSource};
pub use validation::{ConfigValidator, Validate};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokenflags_log::debug;

/// Prefix for environment variables, as in `TOKENFLAGS_ENGINE`.
pub const ENV_PREFIX: &str = "TOKENFLAGS";

type Values = HashMap<String, serde_json::Value>;

/// Layered key/value configuration. Later loads override earlier ones.
#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<Values>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: None,
        }
    }

    /// Manager that reads `<prefix>_*` environment variables.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: Some(prefix.into()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Values> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Values> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load configuration from environment variables.
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.load_vars(loader.load()?);
        Ok(())
    }

    /// Load already-collected environment pairs, stripping the prefix.
    pub fn load_env_from<I>(&self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.load_vars(loader.load_from(vars));
    }

    fn load_vars(&self, vars: HashMap<String, String>) {
        let mut config = self.write();
        for (key, value) in vars {
            config.insert(key, Value::String(value));
        }
    }

    /// Load a `.env` file into the process environment, then read it.
    ///
    /// Without a path, a missing `.env` in the working directory is ignored.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Merge the top-level keys of a configuration file.
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::new(format).load_file(path)?;

        let serde_json::Value::Object(map) = data else {
            return Err(ConfigError::ParseError(format!(
                "{}: expected a table of settings",
                path.display()
            )));
        };

        debug!("Loaded {} keys from {}", map.len(), path.display());
        let mut config = self.write();
        for (key, value) in map {
            config.insert(key, value);
        }

        Ok(())
    }

    /// Like [`load_file`](Self::load_file), detecting the format from the extension.
    pub fn load_file_auto(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.load_file(path, FileFormat::detect(path)?)
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.read();

        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .or_else(|e| match value {
                Value::String(raw) => env::scalar_value(raw)
                    .and_then(|scalar| serde_json::from_value(scalar).ok())
                    .ok_or(e),
                _ => Err(e),
            })
            .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", key, e)))
    }

    /// Get a value, falling back to `default` when missing or mistyped.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Copy every value of `other` into this manager, overriding on conflict.
    pub fn merge(&self, other: &ConfigManager) -> Result<()> {
        if Arc::ptr_eq(&self.config, &other.config) {
            return Ok(());
        }

        let values: Vec<_> = other
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.write().extend(values);

        Ok(())
    }

    /// Deserialize the whole map into `T` and validate it.
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let json_value = serde_json::Value::Object(
            self.read()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        let validated: T = serde_json::from_value(json_value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        validated.validate()?;

        Ok(validated)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let manager = ConfigManager::new();
        manager.set("engine", "/opt/dwr").unwrap();

        let value: String = manager.get("engine").unwrap();
        assert_eq!(value, "/opt/dwr");
    }

    #[test]
    fn test_get_or_default() {
        let manager = ConfigManager::new();
        manager.set("flag_bytes", "many").unwrap();

        assert_eq!(manager.get_or("missing", 15usize), 15);
        assert_eq!(manager.get_or("flag_bytes", 15usize), 15);
    }

    #[test]
    fn test_has_and_keys() {
        let manager = ConfigManager::new();
        manager.set("b", 1).unwrap();
        manager.set("a", 2).unwrap();

        assert!(manager.has("a"));
        assert!(!manager.has("c"));
        assert_eq!(manager.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_type_conversions() {
        let manager = ConfigManager::new();
        manager.set("name", "hello").unwrap();
        manager.set("count", 42i64).unwrap();
        manager.set("enabled", true).unwrap();

        assert_eq!(manager.get_string("name").unwrap(), "hello");
        assert_eq!(manager.get_int("count").unwrap(), 42);
        assert!(manager.get_bool("enabled").unwrap());
        assert!(matches!(
            manager.get_int("name"),
            Err(ConfigError::DeserializationError(_))
        ));
        assert!(matches!(
            manager.get_int("missing"),
            Err(ConfigError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_env_pairs_keep_their_text() {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_env_from(vec![
            ("TOKENFLAGS_FLAG_BYTES".to_string(), "8".to_string()),
            ("TOKENFLAGS_DEFAULT_COSMETIC".to_string(), "Knight".to_string()),
            ("OTHER".to_string(), "x".to_string()),
        ]);

        let settings: Settings = manager.load_validated().unwrap();
        assert_eq!(settings.flag_bytes, 8);
        assert_eq!(settings.default_cosmetic, "Knight");
        assert!(!manager.has("other"));
        assert_eq!(manager.get_int("flag_bytes").unwrap(), 8);
    }

    #[test]
    fn test_env_strings_that_look_like_scalars() {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_env_from(vec![
            ("TOKENFLAGS_DEFAULT_COSMETIC".to_string(), "true".to_string()),
            ("TOKENFLAGS_ENGINE".to_string(), "42".to_string()),
        ]);

        let settings: Settings = manager.load_validated().unwrap();
        assert_eq!(settings.default_cosmetic, "true");
        assert_eq!(settings.engine, Some(std::path::PathBuf::from("42")));
        assert!(manager.get_bool("default_cosmetic").unwrap());
        assert_eq!(manager.get_string("engine").unwrap(), "42");
    }

    #[test]
    fn test_merge_overrides() {
        let base = ConfigManager::new();
        base.set("flag_bytes", 15).unwrap();
        base.set("engine", "a").unwrap();

        let overlay = ConfigManager::new();
        overlay.set("engine", "b").unwrap();

        base.merge(&overlay).unwrap();
        assert_eq!(base.get_int("flag_bytes").unwrap(), 15);
        assert_eq!(base.get_string("engine").unwrap(), "b");

        base.merge(&base.clone()).unwrap();
    }

    #[test]
    fn test_load_validated_rejects_invalid() {
        let manager = ConfigManager::new();
        manager.set("flag_bytes", 0).unwrap();
        assert!(matches!(
            manager.load_validated::<Settings>(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
