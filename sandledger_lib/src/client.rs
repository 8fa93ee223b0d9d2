//! Typed access to the ledger's collections.

use sandledger_api::types::{
    Asset, AssetID, AssetPayload, DailyIncome, IncomeID, IncomePayload, Project, Ship,
};
use sandledger_api::{Client, ListQuery, Paginator};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Settings;
use crate::error::LedgerError;

pub const ASSETS: &str = "assets/";
pub const INCOMES: &str = "incomes/";
pub const SHIPS: &str = "ships/";
pub const PROJECTS: &str = "projects/";

/// CRUD operations for assets, incomes, ships, and projects.
///
/// List calls go through the paginator and return every record. Create,
/// update, and delete map onto POST, PUT and DELETE of `collection/{id}/`.
/// There is no caching: every call hits the backend.
pub struct LedgerClient {
    inner: Client,
    max_pages: Option<usize>,
}

impl LedgerClient {
    pub fn new(settings: &Settings) -> Result<Self, LedgerError> {
        settings.validate()?;
        Ok(Self {
            inner: Client::new(settings.client_config())?,
            max_pages: settings.max_pages,
        })
    }

    /// Creates a client with default settings against `base_url`. Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, LedgerError> {
        Ok(Self {
            inner: Client::with_base_url(base_url)?,
            max_pages: None,
        })
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// The underlying HTTP client.
    pub fn api(&self) -> &Client {
        &self.inner
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(&self.inner).with_page_budget(self.max_pages)
    }

    async fn list<T>(&self, endpoint: &str, query: &ListQuery) -> Result<Vec<T>, LedgerError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("listing {}", endpoint);
        let records = self
            .paginator()
            .fetch_all_as::<T, ListQuery>(endpoint, Some(query))
            .await
            .map_err(|e| {
                tracing::warn!("listing {} failed: {}", endpoint, e);
                e
            })?;
        tracing::debug!("{} returned {} records", endpoint, records.len());
        Ok(records)
    }

    async fn fetch_one<T>(&self, path: &str) -> Result<T, LedgerError>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .inner
            .get::<T, ListQuery>(path, None)
            .await
            .map_err(|e| log_failure("GET", path, e))?;
        Ok(resp.data)
    }

    async fn create<T, B>(&self, collection: &str, body: &B) -> Result<T, LedgerError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let resp = self
            .inner
            .post::<T, B>(collection, body)
            .await
            .map_err(|e| log_failure("POST", collection, e))?;
        tracing::info!("created record in {}", collection);
        Ok(resp.data)
    }

    async fn update<T, B>(&self, path: &str, body: &B) -> Result<T, LedgerError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let resp = self
            .inner
            .put::<T, B>(path, body)
            .await
            .map_err(|e| log_failure("PUT", path, e))?;
        tracing::info!("updated {}", path);
        Ok(resp.data)
    }

    async fn remove(&self, path: &str) -> Result<(), LedgerError> {
        // Some backends answer DELETE with the removed record; ignore the body.
        self.inner
            .delete::<Value>(path)
            .await
            .map_err(|e| log_failure("DELETE", path, e))?;
        tracing::info!("deleted {}", path);
        Ok(())
    }

    // -- Assets --

    pub async fn list_assets(&self) -> Result<Vec<Asset>, LedgerError> {
        self.list(ASSETS, &ListQuery::default()).await
    }

    pub async fn get_asset(&self, id: AssetID) -> Result<Asset, LedgerError> {
        self.fetch_one(&record_path(ASSETS, id)).await
    }

    pub async fn create_asset(&self, payload: &AssetPayload) -> Result<Asset, LedgerError> {
        self.create(ASSETS, payload).await
    }

    pub async fn update_asset(&self, id: AssetID, payload: &AssetPayload) -> Result<Asset, LedgerError> {
        self.update(&record_path(ASSETS, id), payload).await
    }

    pub async fn delete_asset(&self, id: AssetID) -> Result<(), LedgerError> {
        self.remove(&record_path(ASSETS, id)).await
    }

    // -- Incomes --

    pub async fn list_incomes(&self, query: &ListQuery) -> Result<Vec<DailyIncome>, LedgerError> {
        self.list(INCOMES, query).await
    }

    pub async fn get_income(&self, id: IncomeID) -> Result<DailyIncome, LedgerError> {
        self.fetch_one(&record_path(INCOMES, id)).await
    }

    pub async fn create_income(&self, payload: &IncomePayload) -> Result<DailyIncome, LedgerError> {
        self.create(INCOMES, payload).await
    }

    pub async fn update_income(
        &self,
        id: IncomeID,
        payload: &IncomePayload,
    ) -> Result<DailyIncome, LedgerError> {
        self.update(&record_path(INCOMES, id), payload).await
    }

    pub async fn delete_income(&self, id: IncomeID) -> Result<(), LedgerError> {
        self.remove(&record_path(INCOMES, id)).await
    }

    // -- Lookups --

    pub async fn list_ships(&self) -> Result<Vec<Ship>, LedgerError> {
        self.list(SHIPS, &ListQuery::default()).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, LedgerError> {
        self.list(PROJECTS, &ListQuery::default()).await
    }

    /// Aggregates any collection endpoint without decoding its records.
    pub async fn fetch_raw(&self, endpoint: &str, query: &ListQuery) -> Result<Vec<Value>, LedgerError> {
        tracing::debug!("fetching {}", endpoint);
        let records = self
            .paginator()
            .fetch_all(endpoint, Some(query))
            .await
            .map_err(|e| log_failure("GET", endpoint, e))?;
        Ok(records)
    }
}

fn record_path(collection: &str, id: i64) -> String {
    format!("{}{}/", collection, id)
}

fn log_failure(method: &str, path: &str, err: sandledger_api::Error) -> LedgerError {
    tracing::warn!("{} {} failed: {}", method, path, err);
    LedgerError::Api(err)
}
