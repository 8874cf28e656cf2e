//! Core domain logic for NoteFill.
//! This crate is the single source of truth for template and fill invariants.

pub mod logging;
pub mod model;
pub mod pattern;
pub mod service;
pub mod template;
pub mod vault;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dialect::{DialectFeature, TokenDialect};
pub use model::event::FileCreatedEvent;
pub use model::settings::{DailyNoteSettings, DEFAULT_FILENAME_DATE_FORMAT};
pub use pattern::{format_with_pattern, parse_date_strict, pattern_to_strftime, PatternError};
pub use service::companion::{
    wait_for_companion, CompanionError, CompanionProbe, DEFAULT_COMPANION_POLL_INTERVAL,
    DEFAULT_COMPANION_TIMEOUT,
};
pub use service::fill_service::{
    ClockSnapshot, DailyFillService, FillError, FillOutcome, SkipReason,
    RECENTLY_CREATED_THRESHOLD_MILLIS,
};
pub use template::{render, render_with_dialect, DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};
pub use vault::{
    normalize_path, path_is_within, FsVault, MemoryVault, Vault, VaultError, VaultResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
