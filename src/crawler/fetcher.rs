//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client from `HttpConfig`
//! - Single-shot GET requests (no retry)
//! - Classifying failures as network, HTTP status, or content mismatch
//! - The `PageFetcher` seam the scheduler is generic over

use crate::config::HttpConfig;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, timeout, or body read failure
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a status code of 400 or above
    #[error("HTTP {status_code} for {url}")]
    HttpStatus { url: String, status_code: u16 },

    /// The response is not an HTML document
    #[error("Expected text/html from {url}, got '{content_type}'")]
    ContentMismatch { url: String, content_type: String },
}

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: String,
    /// Page body content
    pub body: String,
}

/// Source of page bodies for the crawl scheduler
///
/// One call performs at most one fetch of the given URL and returns the raw
/// HTML document, or the classified reason it is unusable.
pub trait PageFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

impl<T: PageFetcher> PageFetcher for std::sync::Arc<T> {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        (**self).fetch(url)
    }
}

/// `PageFetcher` backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the HTTP settings and wraps it
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        fetch_url(&self.client, url).await.map(|page| page.body)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use link_census::config::HttpConfig;
/// use link_census::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(effective_connect_timeout(config)))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the result
///
/// # Request Flow
///
/// 1. Send a GET request (redirects are followed by the client)
/// 2. Read the body to completion, releasing the connection on every path
/// 3. Classify:
///
/// | Condition | Result |
/// |-----------|--------|
/// | Connect/DNS/timeout/body error | `FetchError::Network` |
/// | Status >= 400 | `FetchError::HttpStatus` |
/// | Content-Type missing or not `text/html` | `FetchError::ContentMismatch` |
/// | Otherwise | `Ok(FetchedPage)` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| network_error(url, &e))?;

    let status = response.status();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response
        .text()
        .await
        .map_err(|e| network_error(url, &e))?;

    if status.as_u16() >= 400 {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    if !content_type.contains("text/html") {
        return Err(FetchError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// Connect timeout in seconds, never longer than the whole-request timeout
fn effective_connect_timeout(config: &HttpConfig) -> u64 {
    config.connect_timeout.min(config.request_timeout)
}

fn network_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}
