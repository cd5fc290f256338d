//! Brazilian Portuguese numeric and date notation.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Parses `1.234,5678`-style numbers: `.` groups thousands, `,` is the
/// decimal separator, and a trailing `%` is allowed.
///
/// Returns `None` for empty cells, placeholders such as `--`, and anything
/// with more than one decimal separator.
pub fn parse_br_decimal(cell: &str) -> Option<Decimal> {
    let text = cell.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim_end();
    if text.is_empty() || text.matches(',').count() > 1 {
        return None;
    }
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty()
        || digits.starts_with(['.', ','])
        || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b',')
    {
        return None;
    }
    let normalized: String = text
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&normalized).ok()
}

/// Parses a day/month/year date separated by `/`, `-` or `.`. Two-digit
/// years are taken as 20yy.
pub fn parse_br_date(cell: &str) -> Option<NaiveDate> {
    let mut parts = cell.trim().split(['/', '-', '.']);
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year_text = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    let year: i32 = year_text.parse().ok()?;
    let year = match year_text.len() {
        2 => 2000 + year,
        4 => year,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
