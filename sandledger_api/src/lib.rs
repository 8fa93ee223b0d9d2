//! Client for the SandLedger REST backend: a preconfigured HTTP client,
//! typed records, and an aggregator that follows page links.

mod client;
mod errors;
mod pagination;
mod query;
pub mod types;
pub use self::client::{ApiResponse, Client, ClientConfig, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::pagination::{PageResponse, Paginator, NEXT_FIELD, RECORD_FIELDS};
pub use self::query::{ListQuery, Query};
