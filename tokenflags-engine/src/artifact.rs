//! Source and output artifacts.

use bytes::Bytes;
use std::path::Path;
use tokio::fs;

use crate::{Result, Seed};

/// Length of the header that precedes the artifact body.
pub const HEADER_LEN: usize = 16;

/// The binary the engine transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    name: String,
    data: Bytes,
}

impl SourceArtifact {
    /// Wrap in-memory data. Only the last path component of `name` is kept.
    pub fn new(name: impl AsRef<str>, data: impl Into<Bytes>) -> Self {
        Self {
            name: basename(name.as_ref()).to_string(),
            data: data.into(),
        }
    }

    /// Read a source artifact from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).await?;
        Ok(Self::new(path.to_string_lossy(), data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The leading [`HEADER_LEN`] bytes (fewer if the artifact is shorter).
    pub fn header(&self) -> &[u8] {
        &self.data[..self.data.len().min(HEADER_LEN)]
    }

    /// Everything after the header.
    pub fn body(&self) -> &[u8] {
        &self.data[self.data.len().min(HEADER_LEN)..]
    }
}

/// The transformed binary produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub data: Bytes,
}

impl Artifact {
    /// Conventional output name: `<prefix>.<seed>.<token>.<extension>`.
    pub fn default_name(prefix: &str, seed: Seed, token: &str, extension: &str) -> String {
        format!("{}.{}.{}.{}", prefix, seed, token, extension)
    }
}

/// Last component of a path written with either `/` or `\` separators.
pub fn basename(path: &str) -> &str {
    let index = path
        .rfind('/')
        .or_else(|| path.rfind('\\'))
        .map(|i| i + 1)
        .unwrap_or(0);
    &path[index..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        assert_eq!(basename("roms/game.nes"), "game.nes");
        assert_eq!(basename("C:\\roms\\game.nes"), "game.nes");
        assert_eq!(basename("game.nes"), "game.nes");
        assert_eq!(basename("dir/"), "");
    }

    #[test]
    fn test_header_and_body() {
        let data: Vec<u8> = (0..20).collect();
        let source = SourceArtifact::new("/tmp/a.bin", data);
        assert_eq!(source.name(), "a.bin");
        assert_eq!(source.header(), &(0..16).collect::<Vec<u8>>()[..]);
        assert_eq!(source.body(), &[16, 17, 18, 19]);

        let short = SourceArtifact::new("b.bin", vec![1, 2]);
        assert_eq!(short.header(), &[1, 2]);
        assert!(short.body().is_empty());
    }

    #[test]
    fn test_default_name() {
        assert_eq!(
            Artifact::default_name("DWRando", Seed(7), "AU", "nes"),
            "DWRando.7.AU.nes"
        );
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.bin");
        tokio::fs::write(&path, b"abc").await.unwrap();

        let source = SourceArtifact::from_path(&path).await.unwrap();
        assert_eq!(source.name(), "source.bin");
        assert_eq!(source.data(), b"abc");
    }
}
