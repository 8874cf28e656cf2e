//! Directory-rooted vault implementation.
//!
//! # Responsibility
//! - Map vault-relative note paths onto a root directory on disk.
//! - Guard the root boundary before touching the filesystem.
//!
//! # Invariants
//! - Resolved paths never leave the root: `..` segments and absolute
//!   paths are rejected up front.
//! - Writes create missing parent folders so new daily notes land in
//!   not-yet-materialized folders.

use super::{normalize_path, Vault, VaultError, VaultResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Vault rooted at one directory on the local filesystem.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Creates a vault over `root`. The directory itself is not created;
    /// missing subfolders appear lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, raw: &str) -> VaultResult<PathBuf> {
        if Path::new(raw).is_absolute() {
            return Err(VaultError::InvalidPath {
                path: raw.to_string(),
                reason: "absolute paths are not vault-relative".to_string(),
            });
        }

        let normalized = normalize_path(raw);
        if normalized.is_empty() {
            return Err(VaultError::InvalidPath {
                path: raw.to_string(),
                reason: "path resolves to the vault root".to_string(),
            });
        }
        if normalized.split('/').any(|segment| segment == "..") {
            return Err(VaultError::InvalidPath {
                path: raw.to_string(),
                reason: "path escapes the vault root".to_string(),
            });
        }

        let mut resolved = self.root.clone();
        for segment in normalized.split('/') {
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

impl Vault for FsVault {
    fn is_file(&self, path: &str) -> bool {
        self.resolve(path)
            .map(|resolved| resolved.is_file())
            .unwrap_or(false)
    }

    fn read(&self, path: &str) -> VaultResult<String> {
        let resolved = self.resolve(path)?;
        fs::read_to_string(&resolved).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                VaultError::NotFound {
                    path: path.to_string(),
                }
            } else {
                VaultError::Io {
                    path: path.to_string(),
                    source: err,
                }
            }
        })
    }

    fn write(&mut self, path: &str, content: &str) -> VaultResult<()> {
        let resolved = self.resolve(path)?;
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent).map_err(|err| VaultError::Io {
                path: path.to_string(),
                source: err,
            })?;
        }
        fs::write(&resolved, content).map_err(|err| VaultError::Io {
            path: path.to_string(),
            source: err,
        })
    }
}
