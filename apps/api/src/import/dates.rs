//! Best-effort date normalization for imported spreadsheet cells.
//!
//! Sheets arrive with whatever date convention their owner typed: ISO,
//! US slashes, European dashes, spelled-out months. Normalization is a
//! total function — a cell that defies interpretation is passed through
//! verbatim so the row is never silently corrupted.

use chrono::NaiveDate;

/// Year-first numeric forms. Only tried when the year is written out in
/// full: chrono's `%Y` accepts short years, which would read `15-03-25`
/// as year 15 instead of leaving it for the day-month-year branch.
const ISO_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Spelled-out month forms.
const TEXTUAL_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Converts a raw date cell to `YYYY-MM-DD` when possible.
///
/// Resolution order: empty input → empty string; a known unambiguous format;
/// `/`-separated triples (US month/day/year when the first part is ≤ 12,
/// day/month/year otherwise); `-`-separated day-month-year triples. Anything
/// else comes back unchanged. Canonical `YYYY-MM-DD` input is idempotent.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(date) = parse_known_format(trimmed) {
        return date.format("%Y-%m-%d").to_string();
    }

    if trimmed.contains('/') {
        if let Some(date) = parse_slash_triple(trimmed) {
            return date.format("%Y-%m-%d").to_string();
        }
        return raw.to_string();
    }

    if trimmed.contains('-') {
        if let Some(date) = parse_dash_triple(trimmed) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    raw.to_string()
}

fn parse_known_format(text: &str) -> Option<NaiveDate> {
    let first_segment_len = text
        .split(['-', '/'])
        .next()
        .map(str::len)
        .unwrap_or_default();

    if first_segment_len == 4 {
        for format in ISO_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                return Some(date);
            }
        }
    }

    for format in TEXTUAL_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    None
}

fn parse_slash_triple(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let first: u32 = parts[0].trim().parse().ok()?;
    let second: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;

    // First part ≤ 12 reads as US month/day/year, otherwise day/month/year.
    let (month, day) = if first <= 12 { (first, second) } else { (second, first) };
    NaiveDate::from_ymd_opt(expand_year(year), month, day)
}

fn parse_dash_triple(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != 3 || parts[0].trim().len() > 2 {
        return None;
    }
    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    NaiveDate::from_ymd_opt(expand_year(year), month, day)
}

/// Two-digit years read as 20xx.
fn expand_year(year: i32) -> i32 {
    if (0..100).contains(&year) {
        2000 + year
    } else {
        year
    }
}
