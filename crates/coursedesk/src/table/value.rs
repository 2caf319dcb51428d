//! Field value types.
//!
//! Records expose their fields as [`FieldValue`]s so the engine can filter,
//! search and sort any entity without knowing its concrete type.

use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Canonical textual format for date-time values.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Runtime representation of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
    /// The record has no value for this field (e.g. an unpublished exercise's date).
    Missing,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn opt_date(value: Option<NaiveDateTime>) -> Self {
        value.map(FieldValue::Date).unwrap_or(FieldValue::Missing)
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map(FieldValue::text).unwrap_or(FieldValue::Missing)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// The stringified form used by text, select and quick filters.
    ///
    /// - Missing: empty string
    /// - Number: integral values print without a fractional part
    /// - Date: [`DATE_TIME_FORMAT`]
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Date(d) => d.format(DATE_TIME_FORMAT).to_string(),
            FieldValue::Missing => String::new(),
        }
    }

    /// Interpret the value as a date-time, parsing text when needed.
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(s) => parse_date_time(s).map(|(dt, _)| dt),
            _ => None,
        }
    }

    /// Interpret the value as a number, parsing text when needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Total order between two present values.
    ///
    /// Same-typed values compare naturally; mixed types fall back to their
    /// stringified forms. `Missing` is handled by the sort comparator, not here.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => a.to_display_string().cmp(&b.to_display_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Date(value)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Parse a number, rejecting blanks, NaN and infinities.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a date or date-time.
///
/// Returns the parsed value and whether the input carried a time of day.
/// Accepted shapes: `2025-04-23`, `2025-04-23T14:32:45`, `2025-04-23 14:32`,
/// fractional seconds, and RFC 3339 with an offset (converted to UTC).
pub fn parse_date_time(raw: &str) -> Option<(NaiveDateTime, bool)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| (dt, false));
    }

    const TIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some((dt, true));
        }
    }

    chrono::DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| (dt.naive_utc(), true))
}
