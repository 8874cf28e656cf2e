//! Moment-style date pattern facility.
//!
//! # Responsibility
//! - Render calendar timestamps with moment-convention patterns (`YYYY-MM-DD`).
//! - Translate the parseable pattern subset to chrono strftime syntax.
//! - Parse note basenames strictly against a configured pattern.
//!
//! # Invariants
//! - Pattern scanning is longest-token-first and left to right.
//! - Characters outside the token table pass through verbatim.
//! - `[... ]` brackets escape literal text, moment-style.
//!
//! Supported tokens: `YYYY YY Q MMMM MMM MM M Do DD D dddd ddd d E HH H hh h
//! mm m ss s A a`. `Q`, `Do`, `d` and `E` are render-only.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAY_ABBREVS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One recognized pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternToken {
    Year4,
    Year2,
    Quarter,
    MonthFull,
    MonthAbbrev,
    Month2,
    Month1,
    DayOrdinal,
    Day2,
    Day1,
    WeekdayFull,
    WeekdayAbbrev,
    WeekdayNumber,
    IsoWeekday,
    Hour2,
    Hour1,
    Hour12Padded,
    Hour12,
    Minute2,
    Minute1,
    Second2,
    Second1,
    MeridiemUpper,
    MeridiemLower,
}

/// Token table ordered longest-first per leading letter.
const TOKEN_TABLE: &[(&str, PatternToken)] = &[
    ("YYYY", PatternToken::Year4),
    ("YY", PatternToken::Year2),
    ("Q", PatternToken::Quarter),
    ("MMMM", PatternToken::MonthFull),
    ("MMM", PatternToken::MonthAbbrev),
    ("MM", PatternToken::Month2),
    ("M", PatternToken::Month1),
    ("Do", PatternToken::DayOrdinal),
    ("DD", PatternToken::Day2),
    ("D", PatternToken::Day1),
    ("dddd", PatternToken::WeekdayFull),
    ("ddd", PatternToken::WeekdayAbbrev),
    ("d", PatternToken::WeekdayNumber),
    ("E", PatternToken::IsoWeekday),
    ("HH", PatternToken::Hour2),
    ("H", PatternToken::Hour1),
    ("hh", PatternToken::Hour12Padded),
    ("h", PatternToken::Hour12),
    ("mm", PatternToken::Minute2),
    ("m", PatternToken::Minute1),
    ("ss", PatternToken::Second2),
    ("s", PatternToken::Second1),
    ("A", PatternToken::MeridiemUpper),
    ("a", PatternToken::MeridiemLower),
];

/// Pattern translation errors for the parse path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Token renders fine but has no strftime equivalent for parsing.
    RenderOnlyToken(&'static str),
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RenderOnlyToken(token) => {
                write!(f, "pattern token `{token}` is render-only and cannot parse input")
            }
        }
    }
}

impl Error for PatternError {}

/// Renders `stamp` using a moment-convention pattern.
///
/// Unrecognized characters are copied through unchanged, so patterns may mix
/// tokens with separators (`YYYY-MM-DD`, `MMM D, YYYY`). Text wrapped in
/// `[brackets]` is emitted verbatim without token scanning.
pub fn format_with_pattern(stamp: NaiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            match after.find(']') {
                Some(end) => {
                    out.push_str(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => {
                    // Unterminated bracket: the remainder is literal text.
                    out.push_str(after);
                    rest = "";
                }
            }
            continue;
        }

        if let Some((token, len)) = match_token(rest) {
            render_token(&mut out, token, stamp);
            rest = &rest[len..];
            continue;
        }

        let ch = rest.chars().next().expect("non-empty pattern rest");
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// Translates a pattern to chrono strftime syntax for parsing.
///
/// # Errors
/// - Returns [`PatternError::RenderOnlyToken`] when the pattern uses a token
///   with no strftime equivalent (`Q`, `Do`, `d`, `E`).
pub fn pattern_to_strftime(pattern: &str) -> Result<String, PatternError> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            match after.find(']') {
                Some(end) => {
                    push_literal(&mut out, &after[..end]);
                    rest = &after[end + 1..];
                }
                None => {
                    push_literal(&mut out, after);
                    rest = "";
                }
            }
            continue;
        }

        if let Some((token, len)) = match_token(rest) {
            out.push_str(token_strftime(token)?);
            rest = &rest[len..];
            continue;
        }

        let ch = rest.chars().next().expect("non-empty pattern rest");
        push_literal_char(&mut out, ch);
        rest = &rest[ch.len_utf8()..];
    }

    Ok(out)
}

/// Parses a note basename strictly against a moment-convention pattern.
///
/// Returns `None` when the pattern is not parseable, when the value does not
/// match the full pattern, or when trailing text remains. Mirrors the host's
/// strict-mode date parsing used to recognize daily-note filenames.
pub fn parse_date_strict(value: &str, pattern: &str) -> Option<NaiveDate> {
    let format = pattern_to_strftime(pattern).ok()?;
    NaiveDate::parse_from_str(value, &format).ok()
}

fn match_token(rest: &str) -> Option<(PatternToken, usize)> {
    TOKEN_TABLE
        .iter()
        .find(|(literal, _)| rest.starts_with(literal))
        .map(|(literal, token)| (*token, literal.len()))
}

fn render_token(out: &mut String, token: PatternToken, stamp: NaiveDateTime) {
    use std::fmt::Write;

    match token {
        PatternToken::Year4 => {
            let _ = write!(out, "{:04}", stamp.year());
        }
        PatternToken::Year2 => {
            let _ = write!(out, "{:02}", stamp.year().rem_euclid(100));
        }
        PatternToken::Quarter => {
            let _ = write!(out, "{}", (stamp.month() - 1) / 3 + 1);
        }
        PatternToken::MonthFull => out.push_str(MONTH_NAMES[stamp.month0() as usize]),
        PatternToken::MonthAbbrev => out.push_str(MONTH_ABBREVS[stamp.month0() as usize]),
        PatternToken::Month2 => {
            let _ = write!(out, "{:02}", stamp.month());
        }
        PatternToken::Month1 => {
            let _ = write!(out, "{}", stamp.month());
        }
        PatternToken::DayOrdinal => {
            let _ = write!(out, "{}{}", stamp.day(), ordinal_suffix(stamp.day()));
        }
        PatternToken::Day2 => {
            let _ = write!(out, "{:02}", stamp.day());
        }
        PatternToken::Day1 => {
            let _ = write!(out, "{}", stamp.day());
        }
        PatternToken::WeekdayFull => {
            out.push_str(WEEKDAY_NAMES[stamp.weekday().num_days_from_sunday() as usize]);
        }
        PatternToken::WeekdayAbbrev => {
            out.push_str(WEEKDAY_ABBREVS[stamp.weekday().num_days_from_sunday() as usize]);
        }
        PatternToken::WeekdayNumber => {
            let _ = write!(out, "{}", stamp.weekday().num_days_from_sunday());
        }
        PatternToken::IsoWeekday => {
            let _ = write!(out, "{}", stamp.weekday().number_from_monday());
        }
        PatternToken::Hour2 => {
            let _ = write!(out, "{:02}", stamp.hour());
        }
        PatternToken::Hour1 => {
            let _ = write!(out, "{}", stamp.hour());
        }
        PatternToken::Hour12Padded => {
            let _ = write!(out, "{:02}", stamp.hour12().1);
        }
        PatternToken::Hour12 => {
            let _ = write!(out, "{}", stamp.hour12().1);
        }
        PatternToken::Minute2 => {
            let _ = write!(out, "{:02}", stamp.minute());
        }
        PatternToken::Minute1 => {
            let _ = write!(out, "{}", stamp.minute());
        }
        PatternToken::Second2 => {
            let _ = write!(out, "{:02}", stamp.second());
        }
        PatternToken::Second1 => {
            let _ = write!(out, "{}", stamp.second());
        }
        PatternToken::MeridiemUpper => out.push_str(if stamp.hour12().0 { "PM" } else { "AM" }),
        PatternToken::MeridiemLower => out.push_str(if stamp.hour12().0 { "pm" } else { "am" }),
    }
}

fn token_strftime(token: PatternToken) -> Result<&'static str, PatternError> {
    match token {
        PatternToken::Year4 => Ok("%Y"),
        PatternToken::Year2 => Ok("%y"),
        PatternToken::Quarter => Err(PatternError::RenderOnlyToken("Q")),
        PatternToken::MonthFull => Ok("%B"),
        PatternToken::MonthAbbrev => Ok("%b"),
        PatternToken::Month2 => Ok("%m"),
        PatternToken::Month1 => Ok("%-m"),
        PatternToken::DayOrdinal => Err(PatternError::RenderOnlyToken("Do")),
        PatternToken::Day2 => Ok("%d"),
        PatternToken::Day1 => Ok("%-d"),
        PatternToken::WeekdayFull => Ok("%A"),
        PatternToken::WeekdayAbbrev => Ok("%a"),
        PatternToken::WeekdayNumber => Err(PatternError::RenderOnlyToken("d")),
        PatternToken::IsoWeekday => Err(PatternError::RenderOnlyToken("E")),
        PatternToken::Hour2 => Ok("%H"),
        PatternToken::Hour1 => Ok("%-H"),
        PatternToken::Hour12Padded => Ok("%I"),
        PatternToken::Hour12 => Ok("%-I"),
        PatternToken::Minute2 => Ok("%M"),
        PatternToken::Minute1 => Ok("%-M"),
        PatternToken::Second2 => Ok("%S"),
        PatternToken::Second1 => Ok("%-S"),
        PatternToken::MeridiemUpper => Ok("%p"),
        PatternToken::MeridiemLower => Ok("%p"),
    }
}

fn push_literal(out: &mut String, text: &str) {
    for ch in text.chars() {
        push_literal_char(out, ch);
    }
}

fn push_literal_char(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
