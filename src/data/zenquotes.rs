//! ZenQuotes API client
//!
//! Fetches the quote of the day from `zenquotes.io`. The endpoint answers with
//! a one-element array of `{ "q": ..., "a": ... }` objects; a bare object is
//! accepted as well.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::Quote;

/// Endpoint for today's quote
const ZENQUOTES_TODAY_URL: &str = "https://zenquotes.io/api/today";

/// Request timeout for the remote lookup
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Errors that can occur when fetching a quote
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or transport failure
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// No response within the timeout
    #[error("Request timed out")]
    Timeout,

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Body was not a quote object or a non-empty array of them
    #[error("Unexpected API response shape: {0}")]
    Shape(String),

    /// Remote lookups are disabled
    #[error("Remote source disabled")]
    Offline,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(err)
        }
    }
}

/// Somewhere today's quote can be fetched from
#[async_trait]
pub trait RemoteQuoteSource: Send + Sync {
    async fn fetch_today(&self) -> Result<Quote, FetchError>;
}

/// A single quote object as returned by ZenQuotes
#[derive(Debug, Deserialize)]
struct ZenQuote {
    /// Quote text
    q: Option<String>,
    /// Author
    a: Option<String>,
}

/// Parses a ZenQuotes response body into a quote
pub fn parse_payload(body: &str) -> Result<Quote, FetchError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Shape(e.to_string()))?;

    let entry = match payload {
        Value::Array(entries) => entries
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Shape("empty array".to_string()))?,
        other => other,
    };
    if !entry.is_object() {
        return Err(FetchError::Shape("expected a quote object".to_string()));
    }

    let entry: ZenQuote =
        serde_json::from_value(entry).map_err(|e| FetchError::Shape(e.to_string()))?;

    match (entry.q, entry.a) {
        (Some(text), Some(author)) => Quote::new(text, author)
            .ok_or_else(|| FetchError::Shape("blank quote or author".to_string())),
        _ => Err(FetchError::Shape("missing quote or author".to_string())),
    }
}

/// Client for the ZenQuotes "today" endpoint
#[derive(Debug, Clone)]
pub struct ZenQuotesClient {
    http_client: Client,
    url: String,
    timeout: Duration,
}

impl Default for ZenQuotesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ZenQuotesClient {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            url: ZENQUOTES_TODAY_URL.to_string(),
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Creates a client pointed at a different URL (for testing)
    #[cfg(test)]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new()
        }
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl RemoteQuoteSource for ZenQuotesClient {
    async fn fetch_today(&self) -> Result<Quote, FetchError> {
        let response = self
            .http_client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_payload(&body)
    }
}

/// A source that never reaches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl RemoteQuoteSource for OfflineSource {
    async fn fetch_today(&self) -> Result<Quote, FetchError> {
        Err(FetchError::Offline)
    }
}
