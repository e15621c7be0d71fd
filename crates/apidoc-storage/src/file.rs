//! Documentation file access

use crate::discovery::discover_definitions;
use apidoc_common::types::DefinitionUrl;
use apidoc_common::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Read access to the documentation directory
#[async_trait]
pub trait DocStorage: Send + Sync {
    /// Read a file relative to the documentation root
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// List the definition files below the documentation root
    async fn list_definitions(&self) -> Result<Vec<DefinitionUrl>>;
}

/// Local filesystem documentation directory
pub struct LocalDocStorage {
    base_path: PathBuf,
}

impl LocalDocStorage {
    /// Create a storage rooted at `path`.
    ///
    /// The directory is not required to exist yet; reads simply fail with
    /// `NotFound` until it does.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let base_path = path.into();
        info!(path = %base_path.display(), "Using documentation directory");

        Self { base_path }
    }

    /// Documentation root
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a relative path to an existing file, with path traversal protection
    fn full_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);

        // Reject paths containing traversal sequences
        if relative
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(Error::Validation(
                "Path traversal detected: '..' is not allowed".to_string(),
            ));
        }

        // Reject absolute paths
        if path.starts_with('/') || path.starts_with('\\') || relative.has_root() {
            return Err(Error::Validation(
                "Absolute paths are not allowed".to_string(),
            ));
        }

        let full = self.base_path.join(relative);

        let canonical_base = self.base_path.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_string()),
            _ => Error::Storage(format!("Failed to canonicalize base path: {}", e)),
        })?;

        let canonical_full = full.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(path.to_string()),
            _ => Error::Storage(format!("Failed to canonicalize path: {}", e)),
        })?;

        // Symlinks inside the root may point anywhere
        if !canonical_full.starts_with(&canonical_base) {
            return Err(Error::Validation(
                "Path traversal detected: resolved path is outside documentation directory"
                    .to_string(),
            ));
        }

        Ok(full)
    }
}

#[async_trait]
impl DocStorage for LocalDocStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path)?;

        let metadata = fs::metadata(&full_path)
            .await
            .map_err(|e| Error::Storage(format!("Failed to get file metadata: {}", e)))?;
        if !metadata.is_file() {
            return Err(Error::NotFound(path.to_string()));
        }

        let data = fs::read(&full_path)
            .await
            .map_err(|e| Error::Storage(format!("Failed to read file: {}", e)))?;

        debug!(path = %path, size = data.len(), "Read documentation file");

        Ok(data)
    }

    async fn list_definitions(&self) -> Result<Vec<DefinitionUrl>> {
        let root = self.base_path.clone();
        tokio::task::spawn_blocking(move || discover_definitions(&root))
            .await
            .map_err(|e| Error::Internal(format!("Definition discovery failed: {}", e)))
    }
}
