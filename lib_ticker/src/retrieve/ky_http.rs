//! # HTTP Retrieval Utilities
//!
//! An asynchronous API client wrapper around `reqwest`, with middleware
//! support for exponential backoff retries. Responses are returned as text
//! together with status metadata; callers decide how to parse the body
//! (HTML fragments, CSV rows).

use std::time::Duration;

use reqwest::Method;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use thiserror::Error;
use url::Url;

/// Retries used when a caller does not ask for a specific count.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Errors raised while building or executing a request.
///
/// Non-2xx statuses are not errors here; they are reported through
/// [`ApiResponse::success`].
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The base URL or a joined path is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying `reqwest` client failed (build, body read, timeout).
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The middleware chain failed after exhausting its retries.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),
}

/// A standardized container for API responses.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The response body when the status was 2xx.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

/// A flexible asynchronous HTTP client.
///
/// Built on top of `reqwest_middleware`, it handles base URLs, query
/// encoding and automatic retries.
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient` with `max_retries` transient-failure retries.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL (e.g., "https://api.example.com/v1/").
    /// * `max_retries` - Retries on transient failures; `0` means a single attempt.
    /// * `timeout` - Optional per-request timeout.
    ///
    /// # Errors
    /// Returns [`RetrieveError::Url`] if `base_url` is not absolute, or
    /// [`RetrieveError::Client`] if the TLS backend cannot be initialised.
    pub fn new(
        base_url: &str,
        max_retries: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, RetrieveError> {
        let url = Url::parse(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        let inner = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { inner, base_url: url })
    }

    /// The base URL every request path is joined to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the absolute URL for `path` with `query` pairs appended.
    pub fn url_for(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, RetrieveError> {
        let mut full_url = self.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = full_url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(full_url)
    }

    /// Performs a request and returns the body as text.
    ///
    /// # Arguments
    /// * `method` - The HTTP verb.
    /// * `path` - The relative path to append to the base URL.
    /// * `query` - Query pairs, URL-encoded on the way out.
    pub async fn request_text(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<String>, RetrieveError> {
        let full_url = self.url_for(path, query)?;
        log::debug!("{} {}", method, full_url);

        let response: reqwest::Response = self.inner.request(method, full_url).send().await?;
        let status = response.status();
        let success = status.is_success();

        if success {
            let body = response.text().await?;
            Ok(ApiResponse {
                data: Some(body),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
            })
        }
    }

    /// Shorthand for a `GET` via [`ApiClient::request_text`].
    pub async fn get_text(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<String>, RetrieveError> {
        self.request_text(Method::GET, path, query).await
    }
}
