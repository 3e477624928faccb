//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML link extraction
//! - The shared visit ledger
//! - Task scheduling and completion tracking

mod fetcher;
mod ledger;
mod parser;
mod scheduler;

pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use ledger::{Claim, VisitLedger};
pub use parser::{extract_links, ExtractError};
pub use scheduler::{CrawlResult, Crawler};

use crate::config::Config;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the `[http]` settings
/// 2. Seed the scheduler with the base URL
/// 3. Fetch pages and follow internal links until no task is outstanding
/// 4. Return the visited pages and outcome statistics
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl ran to completion
/// * `Err(CrawlError)` - The HTTP client or seed URL could not be set up
pub async fn crawl(config: &Config) -> crate::Result<CrawlResult> {
    let fetcher = HttpFetcher::from_config(&config.http)?;
    let crawler = Crawler::new(&config.crawler, fetcher)?;
    Ok(crawler.run().await)
}
