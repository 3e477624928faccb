//! Terminal states of a crawl task
//!
//! Every task ends in exactly one of these. Only `Completed` fans out to new
//! tasks; every other state simply ends that branch of the crawl.

use std::fmt;

/// The final state reached by one crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    // ===== Rejected before fetching =====
    /// The page budget was already spent
    BudgetRejected,

    /// The URL is outside the seed's prefix or uses another scheme
    ScopeRejected,

    /// The URL could not be parsed or normalized
    ParseRejected,

    /// Another task already claimed this page; only its count was bumped
    AlreadyClaimed,

    // ===== Failed after claiming =====
    /// Transport failure, HTTP status >= 400, or non-HTML response
    FetchFailed,

    /// The document could not be scanned for links
    ExtractFailed,

    // ===== Success =====
    /// The page was fetched and its links were spawned as new tasks
    Completed {
        /// Number of non-empty links spawned
        links: usize,
    },
}

impl TaskOutcome {
    /// Returns true if the page was fetched and scanned
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns true if the task stopped before any network call
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::BudgetRejected | Self::ScopeRejected | Self::ParseRejected | Self::AlreadyClaimed
        )
    }

    /// Returns true if the task claimed a page but could not process it
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::ExtractFailed)
    }

    /// Returns true if the task owned its page (it was the first claimant)
    pub fn claimed_page(&self) -> bool {
        self.is_success() || self.is_error()
    }

    /// Short machine-friendly label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetRejected => "budget_rejected",
            Self::ScopeRejected => "scope_rejected",
            Self::ParseRejected => "parse_rejected",
            Self::AlreadyClaimed => "already_claimed",
            Self::FetchFailed => "fetch_failed",
            Self::ExtractFailed => "extract_failed",
            Self::Completed { .. } => "completed",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { links } => write!(f, "completed ({} links)", links),
            other => f.write_str(other.as_str()),
        }
    }
}
