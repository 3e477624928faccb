//! Crawl scheduler: admission-controlled, self-terminating fan-out
//!
//! This module handles:
//! - Spawning one task per discovered link
//! - Global concurrency limiting via a semaphore
//! - Claiming pages in the shared `VisitLedger`
//! - Detecting completion once no task is outstanding
//!
//! Every task holds a sender of the completion channel. Children receive a
//! clone before their parent finishes, so the channel closes exactly when the
//! last task in the crawl drops its sender.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::ledger::{Claim, VisitLedger};
use crate::crawler::parser::extract_links;
use crate::output::{CrawlStatistics, PageVisit};
use crate::state::TaskOutcome;
use crate::url::{normalize_url, CrawlScope};
use crate::UrlError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};

/// Outstanding-work handle; the crawl is finished when all of them are dropped
type CompletionSender = mpsc::UnboundedSender<TaskOutcome>;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Visited pages, highest reference count first
    pub pages: Vec<PageVisit>,

    /// Tally of task outcomes
    pub stats: CrawlStatistics,
}

/// State shared by every task of one crawl run
struct CrawlContext<F> {
    fetcher: F,
    scope: CrawlScope,
    max_pages: usize,
    admission: Semaphore,
    ledger: VisitLedger,
}

/// Drives one crawl from a seed URL to quiescence
///
/// # Example
///
/// ```no_run
/// use link_census::config::{build_config, HttpConfig};
/// use link_census::crawler::{Crawler, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = build_config("https://example.com", 5, 50, HttpConfig::default())?;
/// let fetcher = HttpFetcher::from_config(&config.http)?;
/// let result = Crawler::new(&config.crawler, fetcher)?.run().await;
/// println!("{} pages", result.pages.len());
/// # Ok(())
/// # }
/// ```
pub struct Crawler<F: PageFetcher> {
    context: Arc<CrawlContext<F>>,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler with a fresh ledger and admission gate
    ///
    /// # Arguments
    ///
    /// * `config` - Seed URL and budgets
    /// * `fetcher` - Source of page bodies
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(UrlError)` - The seed URL is malformed or hostless
    pub fn new(config: &CrawlerConfig, fetcher: F) -> Result<Self, UrlError> {
        let scope = CrawlScope::new(&config.base_url)?;

        Ok(Self {
            context: Arc::new(CrawlContext {
                fetcher,
                scope,
                max_pages: config.max_pages as usize,
                admission: Semaphore::new(config.max_concurrency as usize),
                ledger: VisitLedger::new(),
            }),
        })
    }

    /// Runs the crawl until every spawned task has finished
    pub async fn run(self) -> CrawlResult {
        let start_time = Instant::now();
        let seed = self.context.scope.base_url().to_string();

        tracing::info!(
            "Starting crawl of {} (max {} pages, {} concurrent)",
            seed,
            self.context.max_pages,
            self.context.admission.available_permits()
        );

        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        spawn_task(&self.context, seed, done_tx);

        let mut stats = CrawlStatistics::default();
        while let Some(outcome) = done_rx.recv().await {
            stats.record(&outcome);

            let finished = stats.total_tasks();
            if finished % 100 == 0 {
                tracing::info!(
                    "Progress: {} tasks finished, {} pages claimed",
                    finished,
                    self.context.ledger.len()
                );
            }
        }
        stats.elapsed = start_time.elapsed();

        tracing::info!("Crawl completed: {}", stats.summary_line());

        CrawlResult {
            pages: self.context.ledger.visits(),
            stats,
        }
    }
}

/// Launches one crawl task for `raw_url`
///
/// The task reports its outcome on `done` and then drops it, which is what
/// lets the driver observe termination.
fn spawn_task<F: PageFetcher>(
    context: &Arc<CrawlContext<F>>,
    raw_url: String,
    done: CompletionSender,
) {
    let context = Arc::clone(context);
    tokio::spawn(async move {
        let outcome = context.crawl_page(&raw_url, &done).await;
        tracing::trace!("{} -> {}", raw_url, outcome);
        // The receiver only disappears if the driver itself was dropped
        let _ = done.send(outcome);
    });
}

impl<F: PageFetcher> CrawlContext<F> {
    /// Processes a single URL
    ///
    /// This method:
    /// 1. Waits for an admission slot
    /// 2. Checks the page budget
    /// 3. Checks the URL against the crawl scope
    /// 4. Claims the page or counts the reference
    /// 5. Fetches the page and extracts its links
    /// 6. Spawns one task per non-empty link
    async fn crawl_page(self: &Arc<Self>, raw_url: &str, done: &CompletionSender) -> TaskOutcome {
        // Released on every return path
        let _permit = match self.admission.acquire().await {
            Ok(permit) => permit,
            Err(_) => return TaskOutcome::BudgetRejected,
        };

        if self.ledger.is_full(self.max_pages) {
            return TaskOutcome::BudgetRejected;
        }

        match self.scope.admit(raw_url) {
            Ok(_) => {}
            Err(UrlError::Parse(e)) => {
                tracing::debug!("Failed to parse URL {}: {}", raw_url, e);
                return TaskOutcome::ParseRejected;
            }
            Err(e) => {
                tracing::trace!("Skipping {:?}: {}", raw_url, e);
                return TaskOutcome::ScopeRejected;
            }
        }

        let key = match normalize_url(raw_url) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("Failed to normalize URL {}: {}", raw_url, e);
                return TaskOutcome::ParseRejected;
            }
        };

        match self.ledger.claim(key.clone(), self.max_pages) {
            Claim::Claimed => {}
            Claim::AlreadyClaimed => return TaskOutcome::AlreadyClaimed,
            Claim::BudgetExhausted => return TaskOutcome::BudgetRejected,
        }

        tracing::debug!("Fetching {}", raw_url);
        let body = match self.fetcher.fetch(raw_url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Failed to fetch {}: {}", raw_url, e);
                return TaskOutcome::FetchFailed;
            }
        };

        let links = match extract_links(&body, self.scope.base_url()) {
            Ok(links) => links,
            Err(e) => {
                tracing::debug!("Failed to extract links from {}: {}", raw_url, e);
                return TaskOutcome::ExtractFailed;
            }
        };

        let mut spawned = 0;
        for link in links.into_iter().filter(|link| !link.is_empty()) {
            spawn_task(self, link, done.clone());
            spawned += 1;
        }

        tracing::debug!("Crawled {} ({} links)", key, spawned);
        TaskOutcome::Completed { links: spawned }
    }
}
