//! Outcome statistics for a crawl run
//!
//! The scheduler records every finished task here. The totals are logged at
//! the end of a run and can be printed with `--stats`.

use crate::state::TaskOutcome;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched and scanned for links
    pub pages_crawled: u64,

    /// Non-empty links spawned as new tasks
    pub links_discovered: u64,

    /// Distinct pages claimed, whether or not the fetch succeeded
    pub pages_claimed: u64,

    /// Tasks that stopped before any network call
    pub tasks_rejected: u64,

    /// Tasks stopped by the page budget
    pub budget_rejected: u64,

    /// Tasks outside the seed's prefix or scheme
    pub scope_rejected: u64,

    /// Tasks whose URL failed to parse or normalize
    pub parse_rejected: u64,

    /// References to pages another task had already claimed
    pub already_claimed: u64,

    /// Claimed pages whose fetch failed
    pub fetch_failed: u64,

    /// Fetched pages whose links could not be extracted
    pub extract_failed: u64,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Tallies one finished task
    pub fn record(&mut self, outcome: &TaskOutcome) {
        if outcome.claimed_page() {
            self.pages_claimed += 1;
        }
        if outcome.is_rejection() {
            self.tasks_rejected += 1;
        }

        match outcome {
            TaskOutcome::BudgetRejected => self.budget_rejected += 1,
            TaskOutcome::ScopeRejected => self.scope_rejected += 1,
            TaskOutcome::ParseRejected => self.parse_rejected += 1,
            TaskOutcome::AlreadyClaimed => self.already_claimed += 1,
            TaskOutcome::FetchFailed => self.fetch_failed += 1,
            TaskOutcome::ExtractFailed => self.extract_failed += 1,
            TaskOutcome::Completed { links } => {
                self.pages_crawled += 1;
                self.links_discovered += *links as u64;
            }
        }
    }

    /// Number of tasks recorded, the seed included
    pub fn total_tasks(&self) -> u64 {
        self.pages_crawled
            + self.budget_rejected
            + self.scope_rejected
            + self.parse_rejected
            + self.already_claimed
            + self.fetch_failed
            + self.extract_failed
    }

    /// One-line summary for the log
    pub fn summary_line(&self) -> String {
        format!(
            "{} pages crawled, {} failed, {} rejected, {} links followed, {} tasks in {:.2}s",
            self.pages_crawled,
            self.fetch_failed + self.extract_failed,
            self.tasks_rejected,
            self.links_discovered,
            self.total_tasks(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Tasks finished: {}", stats.total_tasks());
    eprintln!("  Pages claimed: {}", stats.pages_claimed);
    eprintln!("  Pages crawled: {}", stats.pages_crawled);
    eprintln!("  Links followed: {}", stats.links_discovered);
    eprintln!("  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    eprintln!();

    eprintln!("Tasks by Outcome:");
    let mut outcome_counts = [
        ("Completed", stats.pages_crawled),
        ("AlreadyClaimed", stats.already_claimed),
        ("ScopeRejected", stats.scope_rejected),
        ("BudgetRejected", stats.budget_rejected),
        ("ParseRejected", stats.parse_rejected),
        ("FetchFailed", stats.fetch_failed),
        ("ExtractFailed", stats.extract_failed),
    ];
    // Sort outcomes by count (descending)
    outcome_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = stats.total_tasks();
    for (label, count) in outcome_counts.iter().filter(|(_, count)| *count > 0) {
        let percentage = (*count as f64 / total as f64) * 100.0;
        eprintln!("  {}: {} ({:.1}%)", label, count, percentage);
    }
    eprintln!();

    let claimed = stats.pages_claimed;
    let success_rate = if claimed > 0 {
        (stats.pages_crawled as f64 / claimed as f64) * 100.0
    } else {
        0.0
    };

    eprintln!(
        "Success Rate: {:.1}% ({} / {} claimed pages crawled)",
        success_rate, stats.pages_crawled, claimed
    );
}
