//! Runtime settings read from the environment.
//!
//! The CLI loads `.env` with `dotenvy` before calling [`Settings::from_env`],
//! so values may come from either the process environment or that file.

use std::time::Duration;

use sandledger_api::{ClientConfig, DEFAULT_TIMEOUT};
use url::Url;

use crate::error::LedgerError;

pub const BASE_URL_VAR: &str = "SANDLEDGER_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "SANDLEDGER_TIMEOUT_MS";
pub const MAX_PAGES_VAR: &str = "SANDLEDGER_MAX_PAGES";

/// Connection settings for the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    /// Page budget for list calls. `None` follows `next` links without limit.
    pub max_pages: Option<usize>,
}

impl Settings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            max_pages: None,
        }
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, LedgerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LedgerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| LedgerError::Config(format!("{} is not set", BASE_URL_VAR)))?;

        let mut settings = Self::new(base_url);
        if let Some(ms) = parse_var::<u64>(&lookup, TIMEOUT_VAR)? {
            settings.timeout = Duration::from_millis(ms);
        }
        settings.max_pages = parse_var::<usize>(&lookup, MAX_PAGES_VAR)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the base URL is absolute and the numbers are usable.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let url = Url::parse(self.base_url.trim()).map_err(|e| {
            LedgerError::Config(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LedgerError::Config(format!(
                "base URL '{}' must use http or https",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(LedgerError::Config("timeout must be greater than 0".to_string()));
        }
        if self.max_pages == Some(0) {
            return Err(LedgerError::Config("max pages must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.trim()).with_timeout(self.timeout)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, LedgerError>
where
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            LedgerError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
    }
}
