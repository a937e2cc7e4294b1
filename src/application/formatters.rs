//! Display normalization for raw video fields.
//!
//! Every function here is pure and total: malformed server values degrade to a
//! fallback string instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::value_objects::bitrate::{BitrateInput, NOT_AVAILABLE};

pub const INVALID_DATE: &str = "Invalid Date";

const BITS_PER_KILOBIT: f64 = 1000.0;
// Mixed radix: 1000 bits per kilobit, 1024 kilobits per megabit.
const KILOBITS_PER_MEGABIT: f64 = 1024.0;

/// Upper-cases the first character and leaves the rest untouched.
/// An empty status stays empty.
pub fn capitalize_status(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders a server date as `dd/mm/yyyy`.
///
/// The calendar date is read as written; no local time zone is applied.
/// Anything unparseable renders as `"Invalid Date"`.
pub fn format_date(date: &str) -> String {
    match parse_calendar_date(date.trim()) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.date_naive());
    }

    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(date_time.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|date_time| date_time.date_naive())
}

/// Human bitrate: `"N Mbps"` from one megabit upward, `"N kbps"` below,
/// `"N/A"` for anything missing, unparseable, or not positive.
pub fn format_bitrate(input: impl Into<BitrateInput>) -> String {
    let bits_per_second = match input.into().bits_per_second() {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let kbps = bits_per_second / BITS_PER_KILOBIT;
    let mbps = kbps / KILOBITS_PER_MEGABIT;

    if mbps >= 1.0 {
        format!("{} Mbps", one_decimal(mbps))
    } else {
        format!("{} kbps", one_decimal(kbps))
    }
}

/// One decimal place, exact half tenths rounded up. `{:.1}` alone rounds those
/// to even, so `1.25` would print as `1.2`.
fn one_decimal(value: f64) -> String {
    let tenths = value * 10.0;
    let exact_tie = value.mul_add(10.0, -tenths) == 0.0 && tenths.fract() == 0.5;
    let value = if exact_tie { tenths.ceil() / 10.0 } else { value };

    let rendered = format!("{:.1}", value);
    match rendered.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => rendered,
    }
}
