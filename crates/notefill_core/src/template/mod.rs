//! Template token renderer.
//!
//! # Responsibility
//! - Expand `{{date}}`/`{{time}}` moment tokens against a note's reference
//!   date, plus the optional dialect keywords `title`, `yesterday` and
//!   `tomorrow`.
//! - Keep rendering a pure function of its inputs. The wall clock arrives
//!   as an explicit parameter.
//!
//! # Invariants
//! - Unrecognized `{{...}}` text passes through verbatim. Rendering never
//!   fails and never panics on user templates.
//! - Tokens expand independently; one malformed token does not affect its
//!   neighbors.
//! - Keywords and offset flags match case-insensitively; format patterns
//!   keep their case.
//!
//! # See also
//! - `crate::pattern` for the output pattern tokens.

use crate::model::dialect::{DialectFeature, TokenDialect};
use crate::model::token::{OffsetUnit, TokenKind, TokenOffset};
use crate::pattern::format_with_pattern;
use chrono::{Days, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

/// Output pattern used when a `date` token names no format.
pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD";
/// Output pattern used when a `time` token names no format.
pub const DEFAULT_TIME_PATTERN: &str = "HH:mm:ss";

static MOMENT_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{(date|time)(?:([+-])([0-9]+)([yqmwdhs]))?(?::(.+?))?\}\}")
        .expect("valid moment token regex")
});
static TITLE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\{title\}\}").expect("valid title token regex"));
static DAY_SHIFT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\{(yesterday|tomorrow)\}\}").expect("valid day-shift regex"));

/// Renders `template` with the full default dialect.
///
/// `reference` carries the note's calendar date; `now` contributes the
/// time of day. See [`render_with_dialect`] for the keyword policy.
pub fn render(
    template: &str,
    reference: NaiveDateTime,
    now: NaiveDateTime,
    display_name: &str,
) -> String {
    render_with_dialect(template, reference, now, display_name, TokenDialect::default())
}

/// Renders `template`, expanding only the keywords `dialect` enables.
///
/// Token grammar: `{{` keyword, optional signed offset (`+1y`, `-2d`, units
/// `y q m w d h s`), optional `:` format pattern, `}}`. The format is
/// matched non-greedily, so it may contain single `}` characters but never
/// `}}`. `{{title}}`, `{{yesterday}}` and `{{tomorrow}}` take no suffix.
///
/// Each `date`/`time` token evaluates against the reference date with
/// `now`'s hour/minute/second merged in, then shifted by its offset.
/// `{{yesterday}}`/`{{tomorrow}}` render the reference date one day away in
/// the default date pattern.
pub fn render_with_dialect(
    template: &str,
    reference: NaiveDateTime,
    now: NaiveDateTime,
    display_name: &str,
    dialect: TokenDialect,
) -> String {
    let with_title = if dialect.supports(DialectFeature::Title) {
        TITLE_TOKEN_RE
            .replace_all(template, NoExpand(display_name))
            .into_owned()
    } else {
        template.to_string()
    };

    let merged = reference.date().and_time(now.time());
    let with_moments = MOMENT_TOKEN_RE
        .replace_all(&with_title, |caps: &Captures<'_>| {
            moment_replacement(caps, merged).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    if !dialect.supports(DialectFeature::YesterdayTomorrow) {
        return with_moments;
    }

    DAY_SHIFT_TOKEN_RE
        .replace_all(&with_moments, |caps: &Captures<'_>| {
            day_shift_replacement(caps, reference).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expands one `date`/`time` match. `None` keeps the token verbatim.
fn moment_replacement(caps: &Captures<'_>, merged: NaiveDateTime) -> Option<String> {
    let kind = TokenKind::parse(&caps[1])?;

    let stamp = match (caps.get(2), caps.get(3), caps.get(4)) {
        (Some(sign), Some(digits), Some(unit)) => {
            let amount = parse_amount(sign.as_str(), digits.as_str())?;
            let unit = OffsetUnit::from_code(unit.as_str().chars().next()?)?;
            TokenOffset::new(amount, unit).shift(merged)?
        }
        _ => merged,
    };

    let pattern = match caps.get(5) {
        Some(format) => format.as_str(),
        None => default_pattern(kind),
    };

    Some(format_with_pattern(stamp, pattern))
}

fn day_shift_replacement(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<String> {
    let shifted = match caps[1].to_ascii_lowercase().as_str() {
        "yesterday" => reference.checked_sub_days(Days::new(1))?,
        "tomorrow" => reference.checked_add_days(Days::new(1))?,
        _ => return None,
    };
    Some(format_with_pattern(shifted, DEFAULT_DATE_PATTERN))
}

fn parse_amount(sign: &str, digits: &str) -> Option<i64> {
    let magnitude: i64 = digits.parse().ok()?;
    Some(if sign == "-" { -magnitude } else { magnitude })
}

fn default_pattern(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Date => DEFAULT_DATE_PATTERN,
        TokenKind::Time => DEFAULT_TIME_PATTERN,
    }
}

#[cfg(test)]
mod tests {
    use super::{render, render_with_dialect, DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};
    use crate::model::dialect::TokenDialect;
    use chrono::{NaiveDate, NaiveDateTime};

    fn stamp(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid test date")
            .and_hms_opt(h, mi, s)
            .expect("valid test time")
    }

    fn reference() -> NaiveDateTime {
        stamp(2024, 3, 10, 0, 0, 0)
    }

    fn clock() -> NaiveDateTime {
        stamp(2025, 1, 2, 14, 30, 45)
    }

    #[test]
    fn default_patterns_match_host_conventions() {
        assert_eq!(DEFAULT_DATE_PATTERN, "YYYY-MM-DD");
        assert_eq!(DEFAULT_TIME_PATTERN, "HH:mm:ss");
    }

    #[test]
    fn template_without_tokens_is_unchanged() {
        let template = "# Notes\n\n- [ ] first task {not a token}\n";
        assert_eq!(render(template, reference(), clock(), "2024-03-10"), template);
    }

    #[test]
    fn date_token_uses_the_reference_not_the_clock() {
        assert_eq!(render("{{date}}", reference(), clock(), ""), "2024-03-10");
    }

    #[test]
    fn time_token_uses_the_clock() {
        assert_eq!(render("{{time}}", reference(), clock(), ""), "14:30:45");
    }

    #[test]
    fn offsets_shift_with_calendar_math() {
        assert_eq!(render("{{date+1y:YYYY}}", reference(), clock(), ""), "2025");
        assert_eq!(
            render("{{date-2d:YYYY-MM-DD}}", reference(), clock(), ""),
            "2024-03-08"
        );
        assert_eq!(render("{{date+10d}}", reference(), clock(), ""), "2024-03-20");
        assert_eq!(render("{{date+1q:MM}}", reference(), clock(), ""), "06");
    }

    #[test]
    fn hour_offset_can_cross_midnight() {
        let late_clock = stamp(2025, 1, 2, 23, 30, 0);
        assert_eq!(render("{{date+1h}}", reference(), late_clock, ""), "2024-03-11");
        assert_eq!(
            render("{{time+1h:HH:mm}}", reference(), late_clock, ""),
            "00:30"
        );
    }

    #[test]
    fn keywords_and_offset_flags_match_case_insensitively() {
        assert_eq!(render("{{DATE}}", reference(), clock(), ""), "2024-03-10");
        assert_eq!(render("{{Date+1Y:YYYY}}", reference(), clock(), ""), "2025");
        assert_eq!(render("{{TIME}}", reference(), clock(), ""), "14:30:45");
    }

    #[test]
    fn format_case_is_preserved() {
        assert_eq!(render("{{date:yyyy}}", reference(), clock(), ""), "yyyy");
    }

    #[test]
    fn title_token_takes_the_display_name_verbatim() {
        assert_eq!(
            render("# {{title}}", reference(), clock(), "2024-03-10"),
            "# 2024-03-10"
        );
        assert_eq!(
            render("{{TITLE}}", reference(), clock(), "pay $100 & log $1"),
            "pay $100 & log $1"
        );
    }

    #[test]
    fn yesterday_and_tomorrow_shift_one_day() {
        let template = "[[{{yesterday}}]] | [[{{tomorrow}}]]";
        assert_eq!(
            render(template, reference(), clock(), ""),
            "[[2024-03-09]] | [[2024-03-11]]"
        );
    }

    #[test]
    fn core_dialect_leaves_optional_keywords_verbatim() {
        let template = "{{title}} {{yesterday}} {{date}}";
        assert_eq!(
            render_with_dialect(template, reference(), clock(), "Day", TokenDialect::core()),
            "{{title}} {{yesterday}} 2024-03-10"
        );
    }

    #[test]
    fn unknown_unit_letter_keeps_token_verbatim() {
        assert_eq!(
            render("{{date+1z:YYYY}}", reference(), clock(), ""),
            "{{date+1z:YYYY}}"
        );
    }

    #[test]
    fn unknown_keyword_keeps_token_verbatim() {
        assert_eq!(
            render("{{weather}} {{date}}", reference(), clock(), ""),
            "{{weather}} 2024-03-10"
        );
    }

    #[test]
    fn empty_format_keeps_token_verbatim() {
        assert_eq!(render("{{date:}}", reference(), clock(), ""), "{{date:}}");
    }

    #[test]
    fn out_of_range_offset_keeps_token_verbatim() {
        assert_eq!(
            render("{{date+999999999y}}", reference(), clock(), ""),
            "{{date+999999999y}}"
        );
        assert_eq!(
            render("{{date-99999999999999999999d}}", reference(), clock(), ""),
            "{{date-99999999999999999999d}}"
        );
    }

    #[test]
    fn format_may_contain_colons_and_single_braces() {
        assert_eq!(
            render("{{time:HH:mm}}", reference(), clock(), ""),
            "14:30"
        );
        assert_eq!(
            render("{{date:YYYY}MM}}", reference(), clock(), ""),
            "2024}03"
        );
    }

    #[test]
    fn tokens_expand_independently() {
        let template = "{{date}} {{date+1d}} {{bogus}} {{time}} {{date+1z}}";
        assert_eq!(
            render(template, reference(), clock(), ""),
            "2024-03-10 2024-03-11 {{bogus}} 14:30:45 {{date+1z}}"
        );
    }

    #[test]
    fn rendering_is_idempotent_once_tokens_are_gone() {
        let template = "# {{date}}\n\n- {{time:HH:mm}}\n";
        let once = render(template, reference(), clock(), "2024-03-10");
        let twice = render(&once, reference(), clock(), "2024-03-10");
        assert_eq!(once, twice);
    }

    #[test]
    fn month_end_offsets_clamp() {
        let eom = stamp(2024, 1, 31, 0, 0, 0);
        assert_eq!(render("{{date+1m}}", eom, clock(), ""), "2024-02-29");
    }
}
