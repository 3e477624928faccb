//! Visit ledger: the crawl's shared deduplication and reference-count table

use crate::output::PageVisit;
use crate::url::CrawlKey;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Result of presenting a key to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// First sighting: the caller owns the page and should fetch it
    Claimed,
    /// The key was already claimed; its count was incremented
    AlreadyClaimed,
    /// The key is new but the page budget is spent; nothing was recorded
    BudgetExhausted,
}

/// Thread-safe map from [`CrawlKey`] to the number of references seen
///
/// One ledger exists per crawl run. The lock is held only for a single map
/// operation and never across an await point.
#[derive(Debug, Default)]
pub struct VisitLedger {
    pages: Mutex<HashMap<CrawlKey, u32>>,
}

impl VisitLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CrawlKey, u32>> {
        // No critical section can panic halfway through an update
        self.pages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of distinct keys claimed so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no key has been claimed
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns true once `max_pages` distinct keys have been claimed
    pub fn is_full(&self, max_pages: usize) -> bool {
        self.lock().len() >= max_pages
    }

    /// Atomically claims a key or counts another reference to it
    ///
    /// The budget only gates new keys. It is checked under the same lock
    /// acquisition as the insert, so the number of distinct keys never
    /// exceeds `max_pages` and exactly one caller observes `Claim::Claimed`
    /// for any key. References to keys already present are always counted.
    pub fn claim(&self, key: CrawlKey, max_pages: usize) -> Claim {
        let mut pages = self.lock();
        let full = pages.len() >= max_pages;

        match pages.get_mut(&key) {
            Some(count) => {
                *count += 1;
                Claim::AlreadyClaimed
            }
            None if full => Claim::BudgetExhausted,
            None => {
                pages.insert(key, 1);
                Claim::Claimed
            }
        }
    }

    /// Current count for a key, if it has been claimed
    pub fn count(&self, key: &CrawlKey) -> Option<u32> {
        self.lock().get(key).copied()
    }

    /// Snapshot of the ledger as report rows, highest count first
    ///
    /// Ties are ordered by key so the listing is deterministic.
    pub fn visits(&self) -> Vec<PageVisit> {
        let mut visits: Vec<PageVisit> = self
            .lock()
            .iter()
            .map(|(key, count)| PageVisit {
                key: key.clone(),
                count: *count,
            })
            .collect();

        visits.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        visits
    }
}
