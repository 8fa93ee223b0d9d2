//! Failures surfaced by [`LedgerClient`](crate::LedgerClient), the forms and
//! [`Settings`](crate::Settings).

use std::fmt;

#[derive(Debug)]
pub enum LedgerError {
    /// The backend call failed: unreachable, timed out, non-2xx, an
    /// undecodable record, or a page chain that outran its budget.
    Api(sandledger_api::Error),
    /// A request body or record could not be converted to or from JSON.
    Serialization(serde_json::Error),
    /// A form field was missing, non-numeric, negative, or badly dated.
    InvalidInput(String),
    /// `SANDLEDGER_*` settings or their CLI overrides are unusable.
    Config(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "backend request failed: {}", e),
            Self::Serialization(e) => write!(f, "could not encode record: {}", e),
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::Config(msg) => write!(f, "bad configuration: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sandledger_api::Error> for LedgerError {
    fn from(e: sandledger_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl LedgerError {
    /// The HTTP status when the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            _ => None,
        }
    }
}
