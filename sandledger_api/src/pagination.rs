//! Auto-pagination over page-linked collection endpoints.
//!
//! A collection endpoint answers either with a bare JSON array (the whole
//! collection) or with an envelope such as
//! `{"results": [...], "next": "https://host/api/incomes/?page=2"}`.
//! [`Paginator`] follows `next` links until they run out and returns every
//! record in page order.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

use crate::{query::Query, Client, Error};

/// Envelope fields that may carry a page's records, in order of preference.
pub const RECORD_FIELDS: [&str; 2] = ["results", "items"];

/// Envelope field that carries the absolute address of the next page.
pub const NEXT_FIELD: &str = "next";

/// One page of a collection endpoint, classified once when it is decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum PageResponse {
    /// The body was a bare array: the complete collection, no continuation.
    BareList(Vec<Value>),
    /// The body was an envelope. `records` is empty when neither record field
    /// held an array; `next` is `None` when absent, null, or empty.
    Wrapped {
        records: Vec<Value>,
        next: Option<String>,
    },
}

impl PageResponse {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(records) => Self::BareList(records),
            Value::Object(mut map) => {
                let records = RECORD_FIELDS
                    .iter()
                    .find_map(|field| match map.remove(*field) {
                        Some(Value::Array(records)) => Some(records),
                        _ => None,
                    })
                    .unwrap_or_default();
                let next = match map.remove(NEXT_FIELD) {
                    Some(Value::String(next)) if !next.trim().is_empty() => Some(next),
                    _ => None,
                };
                Self::Wrapped { records, next }
            }
            _ => Self::Wrapped {
                records: Vec::new(),
                next: None,
            },
        }
    }

    /// The continuation reference, if this page has one.
    pub fn next(&self) -> Option<&str> {
        match self {
            Self::BareList(_) => None,
            Self::Wrapped { next, .. } => next.as_deref(),
        }
    }

    pub fn records(&self) -> &[Value] {
        match self {
            Self::BareList(records) | Self::Wrapped { records, .. } => records,
        }
    }

    pub fn into_parts(self) -> (Vec<Value>, Option<String>) {
        match self {
            Self::BareList(records) => (records, None),
            Self::Wrapped { records, next } => (records, next),
        }
    }
}

impl From<Value> for PageResponse {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl<'de> Deserialize<'de> for PageResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Materializes a paginated endpoint into one ordered `Vec`.
///
/// Pages are fetched strictly one after another. Any failure aborts the whole
/// call and the records gathered so far are dropped. Without a page budget an
/// endpoint whose `next` links never end keeps the loop running forever.
pub struct Paginator<'a> {
    client: &'a Client,
    max_pages: Option<usize>,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            max_pages: None,
        }
    }

    /// Fail with [`Error::PaginationNotTerminated`] instead of fetching more
    /// than `max_pages` pages. Values below 1 are treated as 1.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages.max(1));
        self
    }

    /// Same as [`with_max_pages`](Self::with_max_pages) but accepts an
    /// optional budget, leaving the paginator unbounded on `None`.
    pub fn with_page_budget(self, max_pages: Option<usize>) -> Self {
        match max_pages {
            Some(max) => self.with_max_pages(max),
            None => self,
        }
    }

    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// Fetches `endpoint` and every page linked from it.
    ///
    /// `query` is sent with the first request only; continuation references
    /// already encode whatever the backend needs.
    pub async fn fetch_all<Q>(&self, endpoint: &str, query: Option<&Q>) -> Result<Vec<Value>, Error>
    where
        Q: Query,
    {
        let first = self.client.get::<PageResponse, Q>(endpoint, query).await?;
        let (mut records, mut next) = match first.data {
            PageResponse::BareList(records) => {
                tracing::debug!("{} returned a bare list of {} records", endpoint, records.len());
                return Ok(records);
            }
            PageResponse::Wrapped { records, next } => (records, next),
        };

        let mut pages = 1usize;
        while let Some(url) = next {
            if let Some(max) = self.max_pages {
                if pages >= max {
                    tracing::warn!(
                        "{} still had a next page after {} pages, giving up",
                        endpoint,
                        pages
                    );
                    return Err(Error::PaginationNotTerminated { pages });
                }
            }
            tracing::debug!("{} page {}: {}", endpoint, pages + 1, url);
            let page = self.client.get_absolute::<PageResponse>(&url).await?;
            pages += 1;

            let (chunk, following) = page.data.into_parts();
            records.extend(chunk);
            next = following;
        }

        tracing::debug!(
            "{} complete: {} records across {} pages",
            endpoint,
            records.len(),
            pages
        );
        Ok(records)
    }

    /// Like [`fetch_all`](Self::fetch_all), then decodes each record as `T`.
    pub async fn fetch_all_as<T, Q>(&self, endpoint: &str, query: Option<&Q>) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        self.fetch_all(endpoint, query)
            .await?
            .into_iter()
            .map(|record| {
                T::deserialize(&record).map_err(|e| {
                    tracing::error!("Failed to decode record from {}: {}", endpoint, e);
                    Error::Decode {
                        source: e,
                        body: record.to_string(),
                    }
                })
            })
            .collect()
    }
}

impl Client {
    /// Unbounded [`Paginator::fetch_all`] using this client.
    pub async fn fetch_all<Q>(&self, endpoint: &str, query: Option<&Q>) -> Result<Vec<Value>, Error>
    where
        Q: Query,
    {
        Paginator::new(self).fetch_all(endpoint, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_is_a_bare_list() {
        let page = PageResponse::from_value(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(page, PageResponse::BareList(vec![json!({"id": 1}), json!({"id": 2})]));
        assert_eq!(page.next(), None);
    }

    #[test]
    fn results_field_is_preferred() {
        let page = PageResponse::from_value(json!({
            "results": [{"id": 1}],
            "items": [{"id": 99}],
            "next": "https://host/api/assets/?page=2"
        }));
        assert_eq!(page.records(), &[json!({"id": 1})]);
        assert_eq!(page.next(), Some("https://host/api/assets/?page=2"));
    }

    #[test]
    fn items_field_is_the_fallback() {
        let page = PageResponse::from_value(json!({"items": [{"id": 5}], "next": null}));
        assert_eq!(page.records(), &[json!({"id": 5})]);
        assert_eq!(page.next(), None);
    }

    #[test]
    fn non_array_results_fall_through_to_items() {
        let page = PageResponse::from_value(json!({"results": "oops", "items": [1, 2]}));
        assert_eq!(page.records(), &[json!(1), json!(2)]);
    }

    #[test]
    fn missing_records_field_is_empty() {
        let page = PageResponse::from_value(json!({"count": 0, "next": null}));
        assert_eq!(
            page,
            PageResponse::Wrapped {
                records: vec![],
                next: None
            }
        );
    }

    #[test]
    fn empty_or_non_string_next_means_done() {
        assert_eq!(PageResponse::from_value(json!({"results": [], "next": ""})).next(), None);
        assert_eq!(PageResponse::from_value(json!({"results": [], "next": 2})).next(), None);
    }

    #[test]
    fn scalars_decode_as_empty_envelopes() {
        for value in [json!(null), json!("text"), json!(3), json!(false)] {
            let (records, next) = PageResponse::from_value(value).into_parts();
            assert!(records.is_empty());
            assert!(next.is_none());
        }
    }

    #[test]
    fn deserializes_through_serde() {
        let page: PageResponse =
            serde_json::from_str(r#"{"results": [{"id": 1}], "next": "https://h/p2"}"#).unwrap();
        assert_eq!(page.next(), Some("https://h/p2"));
    }

    #[test]
    fn page_budget_has_floor_of_one() {
        let client = Client::with_base_url("https://ledger.example.com/api/").unwrap();
        assert_eq!(Paginator::new(&client).with_max_pages(0).max_pages(), Some(1));
        assert_eq!(Paginator::new(&client).with_page_budget(None).max_pages(), None);
    }
}
