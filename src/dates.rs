//! Date normalization for loosely-typed source cells. Numbers are 1900-system
//! spreadsheet serials; numeric-looking text is never read as a serial.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::data::RawValue;

/// Highest serial the 1900 system can express (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn to_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Temporal(dt) => Some(dt.date()),
        RawValue::Number(serial) => from_serial(*serial),
        RawValue::Text(text) => parse_text(text),
        RawValue::Absent => None,
    }
}

pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 || serial > MAX_SERIAL {
        return None;
    }
    let days = serial.floor() as i64;
    if days == 0 {
        return None;
    }
    // Serial 60 is 1900-02-29, which never existed; it rolls over to March 1.
    let (base, offset) = if days < 60 {
        (NaiveDate::from_ymd_opt(1899, 12, 31)?, days)
    } else if days == 60 {
        (NaiveDate::from_ymd_opt(1900, 3, 1)?, 0)
    } else {
        (NaiveDate::from_ymd_opt(1899, 12, 30)?, days)
    };
    base.checked_add_signed(Duration::days(offset))
}

pub fn parse_text(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_machine(trimmed).or_else(|| parse_day_first(trimmed))
}

fn parse_machine(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local().date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_local().date());
    }
    for fmt in ISO_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    for fmt in ISO_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn parse_day_first(value: &str) -> Option<NaiveDate> {
    static DAY_FIRST: OnceLock<Regex> = OnceLock::new();
    let pattern = DAY_FIRST.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid day-first pattern")
    });
    let captures = pattern.captures(value)?;
    let day = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let year = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}
