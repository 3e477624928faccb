//! URL handling module for Link-Census
//!
//! This module provides URL normalization into deduplication keys and the
//! scope check that keeps a crawl on its seed site.

mod normalize;
mod scope;

// Re-export main types and functions
pub use normalize::{normalize_url, CrawlKey};
pub use scope::CrawlScope;
