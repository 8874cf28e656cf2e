//! Daily-note fill orchestration.
//!
//! # Responsibility
//! - Decide whether one file-created notification is a fresh daily note.
//! - Load the configured template, render it against the note's date and
//!   write the result back.
//!
//! # Invariants
//! - Qualification checks run before any vault read, in a fixed order:
//!   file, folder, basename date, freshness.
//! - The clock arrives as an explicit snapshot; the service never reads
//!   wall time itself.
//! - Skips leave the vault untouched.

use crate::model::dialect::TokenDialect;
use crate::model::event::FileCreatedEvent;
use crate::model::settings::DailyNoteSettings;
use crate::pattern::parse_date_strict;
use crate::template::render_with_dialect;
use crate::vault::{path_is_within, Vault, VaultError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Age limit under which a created file still counts as newly created.
///
/// Hosts fire create events both for brand-new files and for files that
/// reappear on sync or vault open; the ctime window separates the two.
pub const RECENTLY_CREATED_THRESHOLD_MILLIS: i64 = 1000;

/// Explicit clock inputs for one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// Local wall-clock time, merged into rendered `time` tokens.
    pub now: NaiveDateTime,
    /// Same instant in Unix epoch milliseconds, compared against the
    /// event's creation time.
    pub epoch_millis: i64,
}

impl ClockSnapshot {
    pub fn new(now: NaiveDateTime, epoch_millis: i64) -> Self {
        Self { now, epoch_millis }
    }
}

/// Why a notification did not lead to a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Path is a folder or does not exist in the vault.
    NotAFile,
    /// Path lies outside the configured daily-note folder.
    OutsideFolder,
    /// Basename does not parse with the filename date format.
    NotADailyNote,
    /// Creation time is older than the freshness threshold.
    StaleEvent,
    /// No template path is configured.
    NoTemplateConfigured,
}

impl SkipReason {
    /// Stable code used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAFile => "not_a_file",
            Self::OutsideFolder => "outside_folder",
            Self::NotADailyNote => "not_a_daily_note",
            Self::StaleEvent => "stale_event",
            Self::NoTemplateConfigured => "no_template_configured",
        }
    }
}

/// Result of handling one file-created notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Template was rendered and written into the note.
    Filled,
    /// Notification did not qualify; the vault is untouched.
    Skipped(SkipReason),
}

impl FillOutcome {
    pub fn is_filled(self) -> bool {
        matches!(self, Self::Filled)
    }
}

/// Fill-workflow error for template resolution and note I/O.
#[derive(Debug)]
pub enum FillError {
    /// Configured template does not resolve to a readable note. Non-fatal;
    /// callers surface it as a warning and leave the note empty.
    TemplateUnavailable { path: String },
    /// Underlying vault transport failure.
    Vault(VaultError),
}

impl Display for FillError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateUnavailable { path } => {
                write!(f, "daily-note template unavailable: {path}")
            }
            Self::Vault(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FillError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TemplateUnavailable { .. } => None,
            Self::Vault(err) => Some(err),
        }
    }
}

impl From<VaultError> for FillError {
    fn from(value: VaultError) -> Self {
        Self::Vault(value)
    }
}

/// Fill service over a vault implementation.
pub struct DailyFillService<V: Vault> {
    vault: V,
    settings: DailyNoteSettings,
    dialect: TokenDialect,
    freshness_threshold_millis: i64,
}

impl<V: Vault> DailyFillService<V> {
    /// Creates a service with the default dialect and freshness window.
    pub fn new(vault: V, settings: DailyNoteSettings) -> Self {
        Self {
            vault,
            settings,
            dialect: TokenDialect::default(),
            freshness_threshold_millis: RECENTLY_CREATED_THRESHOLD_MILLIS,
        }
    }

    /// Replaces the keyword dialect used for rendering.
    pub fn with_dialect(mut self, dialect: TokenDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Replaces the freshness window. Mainly for hosts whose create events
    /// arrive with extra latency.
    pub fn with_freshness_threshold_millis(mut self, threshold: i64) -> Self {
        self.freshness_threshold_millis = threshold;
        self
    }

    pub fn settings(&self) -> &DailyNoteSettings {
        &self.settings
    }

    /// Applies new settings for subsequent notifications.
    pub fn update_settings(&mut self, settings: DailyNoteSettings) {
        self.settings = settings;
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Mutable vault access for embedders that seed or inspect notes.
    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    pub fn into_vault(self) -> V {
        self.vault
    }

    /// Handles one file-created notification.
    ///
    /// Qualification is the fixed ladder from the module docs; the first
    /// failing check wins and reports its [`SkipReason`]. A qualifying note
    /// gets the rendered template written over its content.
    ///
    /// # Errors
    /// - [`FillError::TemplateUnavailable`] when the configured template is
    ///   missing or is not a file.
    /// - [`FillError::Vault`] for transport failures while reading the
    ///   template or writing the note.
    pub fn handle_created(
        &mut self,
        event: &FileCreatedEvent,
        clock: ClockSnapshot,
    ) -> Result<FillOutcome, FillError> {
        let reference_date = match self.qualify(event, clock) {
            Ok(date) => date,
            Err(reason) => {
                debug!(
                    "event=daily_fill module=service status=skip path={} reason={}",
                    event.path,
                    reason.as_str()
                );
                return Ok(FillOutcome::Skipped(reason));
            }
        };

        let Some(template_path) = self.settings.resolved_template_path() else {
            debug!(
                "event=daily_fill module=service status=skip path={} reason={}",
                event.path,
                SkipReason::NoTemplateConfigured.as_str()
            );
            return Ok(FillOutcome::Skipped(SkipReason::NoTemplateConfigured));
        };

        if !self.vault.is_file(&template_path) {
            warn!(
                "event=daily_fill module=service status=error error_code=template_unavailable path={} template={}",
                event.path, template_path
            );
            return Err(FillError::TemplateUnavailable {
                path: template_path,
            });
        }

        let template_text = match self.vault.read(&template_path) {
            Ok(text) => text,
            Err(VaultError::NotFound { .. }) => {
                warn!(
                    "event=daily_fill module=service status=error error_code=template_unavailable path={} template={}",
                    event.path, template_path
                );
                return Err(FillError::TemplateUnavailable {
                    path: template_path,
                });
            }
            Err(err) => return Err(FillError::Vault(err)),
        };

        let stem = event.note_stem();
        let reference = reference_date.and_time(NaiveTime::MIN);
        let rendered = render_with_dialect(&template_text, reference, clock.now, stem, self.dialect);
        self.vault.write(&event.path, &rendered)?;

        info!(
            "event=daily_fill module=service status=ok path={} template={}",
            event.path, template_path
        );
        Ok(FillOutcome::Filled)
    }

    fn qualify(
        &self,
        event: &FileCreatedEvent,
        clock: ClockSnapshot,
    ) -> Result<NaiveDate, SkipReason> {
        if !self.vault.is_file(&event.path) {
            return Err(SkipReason::NotAFile);
        }
        if !path_is_within(&event.path, &self.settings.folder_path) {
            return Err(SkipReason::OutsideFolder);
        }

        let reference_date =
            parse_date_strict(event.note_stem(), self.settings.filename_date_format())
                .ok_or(SkipReason::NotADailyNote)?;

        let age_millis = clock.epoch_millis - event.created_at_epoch_millis;
        if age_millis >= self.freshness_threshold_millis {
            return Err(SkipReason::StaleEvent);
        }

        Ok(reference_date)
    }
}
