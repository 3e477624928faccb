//! Configuration module for Link-Census
//!
//! The crawl budget comes from the three positional arguments; HTTP client
//! settings can optionally be loaded from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use link_census::config::{build_config, load_http_config};
//! use std::path::Path;
//!
//! let http = load_http_config(Path::new("census.toml")).unwrap();
//! let config = build_config("https://example.com", 5, 100, http).unwrap();
//! println!("Page budget: {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig};

// Re-export parser functions
pub use parser::{build_config, load_http_config};
