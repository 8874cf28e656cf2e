//! Dialect feature flags for optional template keywords.
//!
//! # Responsibility
//! - Declare the host-dialect keywords that extend the core `date`/`time`
//!   grammar and let embedders switch them on or off.
//!
//! # Invariants
//! - Feature strings are stable lowercase ids suitable for config files.
//! - The default dialect enables every feature.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One optional keyword family of the template dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DialectFeature {
    /// Enables the `{{title}}` keyword.
    Title,
    /// Enables the `{{yesterday}}` and `{{tomorrow}}` keywords.
    YesterdayTomorrow,
}

impl DialectFeature {
    /// Stable string id used in embedder configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => DIALECT_FEATURE_TITLE,
            Self::YesterdayTomorrow => DIALECT_FEATURE_YESTERDAY_TOMORROW,
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Title => "Replace {{title}} with the display name of the note being filled.",
            Self::YesterdayTomorrow => {
                "Replace {{yesterday}} and {{tomorrow}} with day-shifted dates."
            }
        }
    }
}

/// Configuration string value for the title feature.
pub const DIALECT_FEATURE_TITLE: &str = "title";
/// Configuration string value for the yesterday/tomorrow feature.
pub const DIALECT_FEATURE_YESTERDAY_TOMORROW: &str = "yesterday_tomorrow";

const SUPPORTED_DIALECT_FEATURE_STRINGS: &[&str] =
    &[DIALECT_FEATURE_TITLE, DIALECT_FEATURE_YESTERDAY_TOMORROW];

/// Returns supported dialect feature configuration strings.
pub fn supported_dialect_feature_strings() -> &'static [&'static str] {
    SUPPORTED_DIALECT_FEATURE_STRINGS
}

/// Parses one dialect feature from its configuration string value.
pub fn parse_dialect_feature(value: &str) -> Result<DialectFeature, DialectFeatureError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(DialectFeatureError::EmptyFeature);
    }

    match normalized {
        DIALECT_FEATURE_TITLE => Ok(DialectFeature::Title),
        DIALECT_FEATURE_YESTERDAY_TOMORROW => Ok(DialectFeature::YesterdayTomorrow),
        other => Err(DialectFeatureError::UnsupportedFeature(other.to_string())),
    }
}

/// Dialect feature parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialectFeatureError {
    EmptyFeature,
    UnsupportedFeature(String),
}

impl Display for DialectFeatureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFeature => write!(f, "dialect feature value must not be empty"),
            Self::UnsupportedFeature(value) => {
                write!(f, "dialect feature is unsupported: {value}")
            }
        }
    }
}

impl Error for DialectFeatureError {}

/// Enabled keyword set for one renderer instance.
///
/// Core `{{date}}`/`{{time}}` tokens are always on; this toggles only the
/// host-dialect extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDialect {
    title: bool,
    yesterday_tomorrow: bool,
}

impl TokenDialect {
    /// Dialect with every optional keyword enabled.
    pub fn full() -> Self {
        Self {
            title: true,
            yesterday_tomorrow: true,
        }
    }

    /// Dialect with only the core `date`/`time` keywords.
    pub fn core() -> Self {
        Self {
            title: false,
            yesterday_tomorrow: false,
        }
    }

    /// Returns a copy with `feature` toggled to `enabled`.
    pub fn with_feature(mut self, feature: DialectFeature, enabled: bool) -> Self {
        match feature {
            DialectFeature::Title => self.title = enabled,
            DialectFeature::YesterdayTomorrow => self.yesterday_tomorrow = enabled,
        }
        self
    }

    pub fn supports(self, feature: DialectFeature) -> bool {
        match feature {
            DialectFeature::Title => self.title,
            DialectFeature::YesterdayTomorrow => self.yesterday_tomorrow,
        }
    }
}

impl Default for TokenDialect {
    fn default() -> Self {
        Self::full()
    }
}
