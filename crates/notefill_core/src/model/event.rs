//! Vault file-creation event model.
//!
//! # Responsibility
//! - Carry the host notification that a vault entry appeared, together with
//!   the creation timestamp used for freshness checks.
//!
//! # Invariants
//! - `path` is vault-relative with `/` separators, as hosts report it.
//! - `created_at_epoch_millis` is the entry's ctime, not the event arrival
//!   time.

use serde::{Deserialize, Serialize};

/// Notification that a vault entry was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCreatedEvent {
    /// Vault-relative path of the created entry.
    pub path: String,
    /// Creation time in Unix epoch milliseconds.
    pub created_at_epoch_millis: i64,
}

impl FileCreatedEvent {
    pub fn new(path: impl Into<String>, created_at_epoch_millis: i64) -> Self {
        Self {
            path: path.into(),
            created_at_epoch_millis,
        }
    }

    /// Returns the basename without its final extension.
    ///
    /// This is the display name hosts show for a note and the string matched
    /// against the filename date pattern.
    pub fn note_stem(&self) -> &str {
        let name = self
            .path
            .rsplit('/')
            .next()
            .unwrap_or(self.path.as_str());
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }
}
