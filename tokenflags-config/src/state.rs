//! Persisted session state.
//!
//! A flat key/value JSON file that remembers the last token, cosmetic
//! choice and source artifact between runs. Every change is written to
//! disk before the setter returns.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokenflags_log::debug;

use crate::{ConfigError, Result};

/// Last token.
pub const FLAGS_KEY: &str = "flags";
/// Last cosmetic choice.
pub const COSMETIC_KEY: &str = "cosmetic";
/// File name of the last source artifact.
pub const SOURCE_NAME_KEY: &str = "source_name";
/// Hex-encoded bytes of the last source artifact.
pub const SOURCE_DATA_KEY: &str = "source_data";

/// A source artifact remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSource {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl StateStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                ConfigError::ParseError(format!("State file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Opened state {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<String>> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    /// Drop every entry and delete the file.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flags(&self) -> Option<&str> {
        self.get(FLAGS_KEY)
    }

    pub fn set_flags(&mut self, token: &str) -> Result<()> {
        self.set(FLAGS_KEY, token)
    }

    pub fn cosmetic(&self) -> Option<&str> {
        self.get(COSMETIC_KEY)
    }

    pub fn set_cosmetic(&mut self, choice: &str) -> Result<()> {
        self.set(COSMETIC_KEY, choice)
    }

    /// The remembered source artifact, if both name and data are present.
    pub fn source(&self) -> Result<Option<StoredSource>> {
        let (Some(name), Some(data)) = (self.get(SOURCE_NAME_KEY), self.get(SOURCE_DATA_KEY))
        else {
            return Ok(None);
        };

        let data = hex::decode(data).map_err(|e| ConfigError::CorruptState {
            key: SOURCE_DATA_KEY.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(StoredSource {
            name: name.to_string(),
            data,
        }))
    }

    pub fn set_source(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.entries
            .insert(SOURCE_NAME_KEY.to_string(), name.to_string());
        self.entries
            .insert(SOURCE_DATA_KEY.to_string(), hex::encode(data));
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
