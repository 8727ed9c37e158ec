//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for a run:
//! - Building one HTTP client carrying the fixed browser-like headers
//! - GET requests for index and detail pages
//! - Classifying failures into `RequestError`
//!
//! The client keeps its connection pool for the lifetime of the fetcher, so
//! TCP/TLS setup is paid once per host per run. There are no retries.

use crate::config::HttpConfig;
use crate::RequestError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Builds an HTTP client with the configured request headers
///
/// # Arguments
///
/// * `config` - The header configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use rental_harvest::config::HttpConfig;
/// use rental_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    if !config.accept_language.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches documents over one shared client
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    /// Creates a fetcher whose client carries the configured headers
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an already built client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and returns the response body as text
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx/3xx (after redirects) | body text |
    /// | 4xx / 5xx | `RequestError::Status` |
    /// | DNS, connect, timeout, body read | `RequestError::Transport` |
    pub async fn fetch(&self, url: &Url) -> Result<String, RequestError> {
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| RequestError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(RequestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| RequestError::Transport {
                url: url.to_string(),
                source,
            })
    }
}
