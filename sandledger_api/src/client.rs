//! HTTP client for the SandLedger REST backend.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{query::Query, Error};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Transport configuration shared by every request a [`Client`] sends.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base address that relative paths are resolved against.
    pub base_url: String,
    /// Timeout applied to each individual request.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A decoded response: the HTTP status and the parsed body.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

/// HTTP client for the SandLedger REST backend.
///
/// Built once at startup and passed by reference to whatever needs it. Every
/// request carries `Content-Type: application/json` and the configured
/// timeout. Nothing is retried or cached.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Creates a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport {
                    url: base_url.to_string(),
                    source: e,
                }
            })?;

        Ok(Self { http, base_url })
    }

    /// Creates a client with the default timeout. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig::new(base_url))
    }

    /// The normalized base address (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                tracing::error!("Invalid URL constructed from {:?}: {}", path, e);
                Error::InvalidUrl(format!("{}: {}", path, e))
            })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn send<T>(&self, request: RequestBuilder, url: &Url) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            Error::Transport {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            Error::Transport {
                url: url.to_string(),
                source: e,
            }
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        // 204 and friends carry no body; decode them as JSON null.
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        let data = serde_json::from_str::<T>(text).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
            Error::Decode {
                source: e,
                body: snippet,
            }
        })?;

        Ok(ApiResponse {
            status: status.as_u16(),
            data,
        })
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.http.request(method, url.clone())
    }

    /// GET a path relative to the base address.
    pub async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.send(self.request(Method::GET, &url), &url).await
    }

    /// GET an absolute address, bypassing the base address. Timeout and
    /// default headers still apply.
    pub async fn get_absolute<T>(&self, url: &str) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = Url::parse(url).map_err(|e| {
            tracing::error!("Invalid continuation URL {:?}: {}", url, e);
            Error::InvalidUrl(format!("{}: {}", url, e))
        })?;
        self.send(self.request(Method::GET, &url), &url).await
    }

    /// POST a JSON body to a path relative to the base address.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, None::<&crate::ListQuery>)?;
        self.send(self.request(Method::POST, &url).json(body), &url)
            .await
    }

    /// PUT a JSON body to a path relative to the base address.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, None::<&crate::ListQuery>)?;
        self.send(self.request(Method::PUT, &url).json(body), &url)
            .await
    }

    /// DELETE a path relative to the base address.
    pub async fn delete<T>(&self, path: &str) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path, None::<&crate::ListQuery>)?;
        self.send(self.request(Method::DELETE, &url), &url).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!(
            "{}: cannot be used as a base address",
            base_url
        )));
    }
    Ok(url)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListQuery;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = Client::with_base_url("https://ledger.example.com/api").unwrap();
        assert_eq!(client.base_url().as_str(), "https://ledger.example.com/api/");
    }

    #[test]
    fn relative_paths_resolve_under_base() {
        let client = Client::with_base_url("https://ledger.example.com/api/").unwrap();
        let url = client.get_url("assets/", None::<&ListQuery>).unwrap();
        assert_eq!(url.as_str(), "https://ledger.example.com/api/assets/");

        let url = client.get_url("/incomes/4/", None::<&ListQuery>).unwrap();
        assert_eq!(url.as_str(), "https://ledger.example.com/api/incomes/4/");
    }

    #[test]
    fn query_is_appended() {
        let client = Client::with_base_url("https://ledger.example.com/api").unwrap();
        let query = ListQuery::new().with_param("ship", "2");
        let url = client.get_url("incomes/", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://ledger.example.com/api/incomes/?ship=2");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            Client::with_base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::with_base_url("mailto:ops@example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        let config = ClientConfig::new("https://ledger.example.com");
        assert_eq!(config.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() < body.len());
    }
}
