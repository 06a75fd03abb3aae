//! High-level configuration service.

use crate::{ConfigManager, ENV_PREFIX, FileFormat, Result, Settings};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Read-only view over a loaded [`ConfigManager`].
#[derive(Clone, Default)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.manager.get(key)
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.manager.get_or(key, default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.manager.get_string(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.manager.has(key)
    }

    /// Validated application settings.
    pub fn settings(&self) -> Result<Settings> {
        self.manager.load_validated()
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

/// Builder for [`ConfigService`].
///
/// Sources are applied in a fixed order: `.env`, then the environment,
/// then files in the order they were added.
pub struct ConfigServiceBuilder {
    manager: ConfigManager,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    config_files: Vec<(PathBuf, Option<FileFormat>)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::with_prefix(ENV_PREFIX),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    /// Use a different environment variable prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manager = ConfigManager::with_prefix(prefix);
        self
    }

    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), Some(format)));
        self
    }

    /// Add a file whose format is detected from its extension.
    pub fn add_file_auto(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push((path.into(), None));
        self
    }

    pub fn build(self) -> Result<ConfigService> {
        if self.load_dotenv {
            // A missing .env is not an error
            let _ = self.manager.load_dotenv(self.dotenv_path.as_deref());
        }

        if self.load_env {
            self.manager.load_env()?;
        }

        for (path, format) in self.config_files {
            match format {
                Some(format) => self.manager.load_file(&path, format)?,
                None => self.manager.load_file_auto(&path)?,
            }
        }

        Ok(ConfigService::from_manager(self.manager))
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
