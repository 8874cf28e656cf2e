//! Vault storage abstraction.
//!
//! # Responsibility
//! - Define the minimal note I/O surface the fill workflow needs.
//! - Normalize host-style vault paths before any storage access.
//!
//! # Invariants
//! - Vault paths are relative, `/`-separated, with no empty segments.
//! - Implementations never follow `..` out of their root.
//!
//! # See also
//! - `fs` for the directory-rooted implementation.
//! - `memory` for the in-memory implementation used in tests/embedding.

pub mod fs;
pub mod memory;

pub use fs::FsVault;
pub use memory::MemoryVault;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for vault APIs.
pub type VaultResult<T> = Result<T, VaultError>;

/// Vault-layer error for path validation and note I/O.
#[derive(Debug)]
pub enum VaultError {
    /// Path does not resolve to an existing note.
    NotFound { path: String },
    /// Path cannot be used with this vault.
    InvalidPath { path: String, reason: String },
    /// Underlying transport failure.
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "vault note not found: {path}"),
            Self::InvalidPath { path, reason } => {
                write!(f, "invalid vault path `{path}`: {reason}")
            }
            Self::Io { path, source } => write!(f, "vault io failure at `{path}`: {source}"),
        }
    }
}

impl Error for VaultError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::InvalidPath { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Minimal note storage surface for the fill workflow.
///
/// Paths are vault-relative. Implementations normalize them with
/// [`normalize_path`] so `Journal\\2024-03-10.md` and `Journal/2024-03-10.md`
/// address the same note.
pub trait Vault {
    /// Returns `true` when `path` resolves to an existing note file.
    ///
    /// Folders and dangling paths return `false`.
    fn is_file(&self, path: &str) -> bool;

    /// Reads a note's full text.
    fn read(&self, path: &str) -> VaultResult<String>;

    /// Writes a note's full text, replacing any previous content.
    fn write(&mut self, path: &str, content: &str) -> VaultResult<()>;
}

/// Normalizes a host-style vault path.
///
/// Backslashes become slashes, repeated separators collapse, and leading or
/// trailing separators drop. The result is `/`-joined relative segments;
/// an empty result means the vault root.
pub fn normalize_path(raw: &str) -> String {
    raw.trim()
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns `true` when `path` sits inside `folder` (both normalized).
///
/// An empty folder means the whole vault, so every path qualifies. A path
/// equal to the folder itself does not qualify; membership requires a
/// segment boundary, so `Journal2/x.md` is outside `Journal`.
pub fn path_is_within(path: &str, folder: &str) -> bool {
    let folder = normalize_path(folder);
    if folder.is_empty() {
        return true;
    }

    let path = normalize_path(path);
    match path.strip_prefix(&folder) {
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
