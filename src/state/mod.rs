//! State module for crawl task results
//!
//! Each crawl task finishes in one `TaskOutcome`. Outcomes are reported to the
//! crawl driver, which tallies them into run statistics.

mod task_outcome;

pub use task_outcome::TaskOutcome;
