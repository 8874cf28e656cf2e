//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notefill_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::NaiveDate;

fn main() {
    println!("notefill_core version={}", notefill_core::core_version());
    match probe_render() {
        Some(rendered) => println!("notefill_core render={rendered}"),
        None => println!("notefill_core render=unavailable"),
    }
}

fn probe_render() -> Option<String> {
    let reference = NaiveDate::from_ymd_opt(2024, 3, 10)?.and_hms_opt(0, 0, 0)?;
    let now = NaiveDate::from_ymd_opt(2024, 3, 10)?.and_hms_opt(9, 30, 0)?;
    Some(notefill_core::render(
        "{{title}}: {{date}} {{time}} next={{date+1d}}",
        reference,
        now,
        "2024-03-10",
    ))
}
