//! Shared query infrastructure: the [`Query`] trait and the [`ListQuery`] builder.

use std::collections::BTreeMap;

use url::Url;

/// Trait implemented by query builders. Appends the builder's parameters to a
/// request URL.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Query parameters for a collection endpoint.
///
/// Keys are unique: setting a key twice keeps the last value. Parameters are
/// emitted in key order so the same query always produces the same URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter, replacing any previous value for `key`.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets the number of results per page (`page_size`).
    pub fn with_page_size(self, page_size: u32) -> Self {
        self.with_param("page_size", page_size.to_string())
    }

    /// Sets a free-text search filter (`search`).
    pub fn with_search(self, search: &str) -> Self {
        self.with_param("search", search)
    }

    /// Returns the value set for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for ListQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ListQuery::default(), |q, (k, v)| q.with_param(k, v))
    }
}

impl Query for ListQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}
