//! Output module for crawl results
//!
//! This module handles:
//! - Rendering the plain-text link report
//! - Tallying and printing task outcome statistics

mod report;
pub mod stats;

pub use report::{render_report, PageVisit};
pub use stats::{print_statistics, CrawlStatistics};
