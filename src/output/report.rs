//! Plain-text link report

use crate::url::CrawlKey;

/// One row of the report: a page and how many internal links point at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVisit {
    /// Normalized page identity
    pub key: CrawlKey,

    /// Internal references seen, the page's own claim included
    pub count: u32,
}

/// Renders the link report for a finished crawl
///
/// The banner is followed by one line per page, count descending with ties
/// broken by key. An empty slice renders the banner alone.
///
/// # Arguments
///
/// * `pages` - Visited pages, in any order
/// * `base_url` - The seed URL, shown in the banner as given
///
/// # Example
///
/// ```
/// use link_census::{normalize_url, render_report, PageVisit};
///
/// let pages = vec![PageVisit {
///     key: normalize_url("https://a.test/b").unwrap(),
///     count: 1,
/// }];
/// let report = render_report(&pages, "https://a.test");
/// assert!(report.ends_with("Found 1 internal link to a.test/b\n"));
/// ```
pub fn render_report(pages: &[PageVisit], base_url: &str) -> String {
    let mut sorted: Vec<&PageVisit> = pages.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    let mut report = String::new();
    report.push_str("=============================\n");
    report.push_str(&format!("  REPORT for {}\n", base_url));
    report.push_str("=============================\n");

    for visit in sorted {
        let noun = if visit.count == 1 { "link" } else { "links" };
        report.push_str(&format!(
            "Found {} internal {} to {}\n",
            visit.count, noun, visit.key
        ));
    }

    report
}
