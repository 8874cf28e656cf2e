//! In-memory vault implementation.
//!
//! # Responsibility
//! - Provide a deterministic storage twin for tests and embedders that
//!   manage note text themselves.
//!
//! # Invariants
//! - Notes are keyed by normalized path, so separator style never forks
//!   the store.

use super::{normalize_path, Vault, VaultError, VaultResult};
use std::collections::BTreeMap;

/// Vault over an in-memory map of note text.
#[derive(Debug, Default)]
pub struct MemoryVault {
    notes: BTreeMap<String, String>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a note, replacing any previous content at the same path.
    pub fn insert_note(&mut self, path: &str, content: impl Into<String>) {
        self.notes.insert(normalize_path(path), content.into());
    }

    /// Returns the stored text for `path`, if any.
    pub fn note(&self, path: &str) -> Option<&str> {
        self.notes.get(&normalize_path(path)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Vault for MemoryVault {
    fn is_file(&self, path: &str) -> bool {
        self.notes.contains_key(&normalize_path(path))
    }

    fn read(&self, path: &str) -> VaultResult<String> {
        self.notes
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| VaultError::NotFound {
                path: path.to_string(),
            })
    }

    fn write(&mut self, path: &str, content: &str) -> VaultResult<()> {
        self.notes
            .insert(normalize_path(path), content.to_string());
        Ok(())
    }
}
