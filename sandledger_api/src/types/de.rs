//! Lenient decoding for numeric and date fields.
//!
//! Decimal columns come back either as JSON numbers or as strings
//! (`"14.25"`), depending on how the backend serializes them. Date columns
//! may carry a time part (`"2024-03-01T08:30:00Z"`).

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a number out of a JSON value that may be a number or a numeric string.
///
/// Returns `None` for null, empty or unparseable strings, and non-finite values.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Parses `YYYY-MM-DD`, ignoring a trailing time part separated by `T` or a space.
pub fn date_from_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = match raw.find(['T', ' ']) {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    date_from_str(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}
