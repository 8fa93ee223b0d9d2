use chrono::NaiveDate;

use crate::error::LedgerError;

pub const MAX_ITEM_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, LedgerError> {
    if input.len() > max_len {
        return Err(LedgerError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(LedgerError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Free-form description: may be empty, keeps newlines and tabs.
pub fn sanitize_description(input: Option<&str>) -> Result<String, LedgerError> {
    let input = input.unwrap_or_default();
    if input.len() > MAX_DESCRIPTION_LENGTH {
        return Err(LedgerError::InvalidInput(format!(
            "description exceeds maximum length of {} bytes",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, ' ' | '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string())
}

/// Parse a decimal typed by a user. Thousands separators are ignored.
pub fn parse_number(field: &str, input: &str) -> Result<f64, LedgerError> {
    let cleaned = input.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            LedgerError::InvalidInput(format!("{} must be a number, got '{}'", field, input.trim()))
        })
}

/// Like [`parse_number`], but a missing or blank input is `None`.
pub fn parse_optional_number(field: &str, input: Option<&str>) -> Result<Option<f64>, LedgerError> {
    match input {
        Some(raw) if !raw.trim().is_empty() => parse_number(field, raw).map(Some),
        _ => Ok(None),
    }
}

pub fn validate_non_negative(field: &str, value: f64) -> Result<f64, LedgerError> {
    if value < 0.0 {
        return Err(LedgerError::InvalidInput(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(value)
}

/// Validate an income amount: must be strictly positive. Rounded to cents.
pub fn validate_amount(amount: Option<f64>) -> Result<f64, LedgerError> {
    match amount {
        Some(a) if a > 0.0 => Ok(round2(a)),
        _ => Err(LedgerError::InvalidInput(
            "amount must be a positive number".to_string(),
        )),
    }
}

/// Validate a calendar date in `YYYY-MM-DD` form.
pub fn validate_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        LedgerError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
            trimmed
        ))
    })
}

/// Validate a month filter in `YYYY-MM` form. Returns it normalized (trimmed).
pub fn validate_month(input: &str) -> Result<String, LedgerError> {
    let trimmed = input.trim();
    let well_formed = trimmed.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d").is_ok();
    if !well_formed {
        return Err(LedgerError::InvalidInput(format!(
            "invalid month '{}'. Expected format: YYYY-MM (e.g., 2024-06)",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Round to two decimal places (cents).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `quantity * rate`, rounded to cents.
pub fn derive_total(quantity: f64, rate: f64) -> f64 {
    round2(quantity * rate)
}
