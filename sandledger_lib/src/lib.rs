//! Library layer for SandLedger: settings, form handling, list views, and a
//! typed CRUD client.
//!
//! Wraps the `sandledger_api` crate with typed collection operations, input
//! validation, and the aggregates shown by the list views.

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod validation;
pub mod views;

pub use sandledger_api;
pub use sandledger_api::types;
pub use sandledger_api::{ListQuery, Paginator, Query};

pub use client::LedgerClient;
pub use config::Settings;
pub use error::LedgerError;
pub use forms::{AssetForm, IncomeForm};
pub use views::IncomeFilter;
