//! Link-Census: a bounded single-site link counter
//!
//! This crate crawls one website from a seed URL, follows internal links
//! concurrently, fetches every distinct page at most once, and reports how many
//! times each page is referenced.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Census operations
///
/// Only failures that stop a crawl before it starts end up here. Problems with
/// individual pages are recorded as [`state::TaskOutcome`] values instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Empty URL")]
    Empty,

    #[error("Missing host in URL")]
    MissingHost,

    #[error("URL is outside the crawl scope: {0}")]
    OutOfScope(String),

    #[error("Scheme mismatch: expected {expected}, found {found}")]
    SchemeMismatch { expected: String, found: String },
}

/// Result type alias for Link-Census operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{crawl, CrawlResult, Crawler, VisitLedger};
pub use crate::output::{render_report, CrawlStatistics, PageVisit};
pub use crate::state::TaskOutcome;
pub use crate::url::{normalize_url, CrawlKey, CrawlScope};
