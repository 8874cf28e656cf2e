//! Template token model.
//!
//! # Responsibility
//! - Name the token keywords the renderer understands.
//! - Model calendar offsets (`+1y`, `-2d`) and apply them with checked
//!   calendar arithmetic.
//!
//! # Invariants
//! - Month-based shifts clamp to the last valid day of the target month.
//! - Overflowing shifts return `None` instead of panicking.

use chrono::{Days, Months, NaiveDateTime, TimeDelta};

/// Keyword of a recognized moment token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Renders from the note's reference date.
    Date,
    /// Renders from the wall clock merged into the reference date.
    Time,
}

impl TokenKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            _ => None,
        }
    }
}

/// Calendar unit of a token offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
    Hours,
    Seconds,
}

impl OffsetUnit {
    /// Maps the single-letter unit codes (`y q m w d h s`), case-insensitive.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'y' => Some(Self::Years),
            'q' => Some(Self::Quarters),
            'm' => Some(Self::Months),
            'w' => Some(Self::Weeks),
            'd' => Some(Self::Days),
            'h' => Some(Self::Hours),
            's' => Some(Self::Seconds),
            _ => None,
        }
    }
}

/// Signed calendar offset attached to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenOffset {
    pub amount: i64,
    pub unit: OffsetUnit,
}

impl TokenOffset {
    pub fn new(amount: i64, unit: OffsetUnit) -> Self {
        Self { amount, unit }
    }

    /// Shifts `stamp` by this offset.
    ///
    /// Year and quarter offsets reduce to month shifts so that end-of-month
    /// dates clamp the way calendar libraries conventionally clamp them
    /// (Jan 31 + 1m is Feb 29 in a leap year). Returns `None` when the
    /// result falls outside the representable range.
    pub fn shift(self, stamp: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.unit {
            OffsetUnit::Years => shift_months(stamp, self.amount.checked_mul(12)?),
            OffsetUnit::Quarters => shift_months(stamp, self.amount.checked_mul(3)?),
            OffsetUnit::Months => shift_months(stamp, self.amount),
            OffsetUnit::Weeks => shift_days(stamp, self.amount.checked_mul(7)?),
            OffsetUnit::Days => shift_days(stamp, self.amount),
            OffsetUnit::Hours => stamp.checked_add_signed(TimeDelta::try_hours(self.amount)?),
            OffsetUnit::Seconds => stamp.checked_add_signed(TimeDelta::try_seconds(self.amount)?),
        }
    }
}

fn shift_months(stamp: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(amount.unsigned_abs()).ok()?;
    if amount >= 0 {
        stamp.checked_add_months(Months::new(magnitude))
    } else {
        stamp.checked_sub_months(Months::new(magnitude))
    }
}

fn shift_days(stamp: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let magnitude = Days::new(amount.unsigned_abs());
    if amount >= 0 {
        stamp.checked_add_days(magnitude)
    } else {
        stamp.checked_sub_days(magnitude)
    }
}
