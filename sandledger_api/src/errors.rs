//! Error types for the API client.

/// Errors that can occur when making API requests.
///
/// Transport failures and non-success statuses are both surfaced to the
/// caller unchanged; nothing in this crate retries or recovers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body could not be decoded into the requested type.
    #[error("Failed to decode response body")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// A base address, path, or continuation reference was not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A page budget was configured and the endpoint kept returning `next`.
    #[error("Pagination did not terminate within {pages} pages")]
    PaginationNotTerminated { pages: usize },
}

impl Error {
    /// Returns the HTTP status for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the underlying transport error was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}
