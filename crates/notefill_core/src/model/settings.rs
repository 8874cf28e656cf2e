//! Daily-note settings model.
//!
//! # Responsibility
//! - Define the embedder-facing configuration for the fill workflow.
//! - Normalize raw settings values before the service consumes them.
//!
//! # Invariants
//! - Field names serialize in camelCase to match host settings payloads.
//! - An empty `folder_path` means the whole vault is eligible.
//! - Template paths resolve with a `.md` suffix whether or not the user
//!   typed one.

use serde::{Deserialize, Serialize};

/// Default moment pattern for recognizing daily-note basenames.
pub const DEFAULT_FILENAME_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Embedder configuration for the daily-note fill workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyNoteSettings {
    /// Vault-relative folder watched for new daily notes. Empty watches
    /// the whole vault.
    pub folder_path: String,
    /// Vault-relative path of the template note. Empty disables filling.
    pub template_file_path: String,
    /// Moment pattern a basename must match to count as a daily note.
    pub filename_date_format: String,
}

impl Default for DailyNoteSettings {
    fn default() -> Self {
        Self {
            folder_path: String::new(),
            template_file_path: String::new(),
            filename_date_format: DEFAULT_FILENAME_DATE_FORMAT.to_string(),
        }
    }
}

impl DailyNoteSettings {
    /// Returns the template path with the markdown suffix applied.
    ///
    /// `None` when no template is configured. Users commonly omit the
    /// extension in settings, so `Templates/Daily` and `Templates/Daily.md`
    /// resolve to the same note.
    pub fn resolved_template_path(&self) -> Option<String> {
        let trimmed = self.template_file_path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.ends_with(".md") {
            Some(trimmed.to_string())
        } else {
            Some(format!("{trimmed}.md"))
        }
    }

    /// Returns the filename pattern, falling back to the default when the
    /// configured value is blank.
    pub fn filename_date_format(&self) -> &str {
        let trimmed = self.filename_date_format.trim();
        if trimmed.is_empty() {
            DEFAULT_FILENAME_DATE_FORMAT
        } else {
            trimmed
        }
    }
}
