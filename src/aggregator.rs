//! Result merging, deduplication, and ordering.

use std::collections::HashSet;

use crate::{GigResults, ScraperResult};

/// Merges scraper results into one deduplicated, newest-first list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator;

impl Aggregator {
    /// Creates a new aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Aggregates results from multiple scrapers.
    ///
    /// This performs:
    /// 1. Concatenation in scraper-completion order
    /// 2. Deduplication on `(platform, external_id)`, keeping the first
    ///    occurrence per key
    /// 3. A stable sort by `posted_at` descending
    ///
    /// The seen-key set lives only for the duration of this call; no
    /// cross-call dedup state is retained. Advisory scraper errors are
    /// carried through into the result.
    pub fn aggregate(&self, scraper_results: Vec<(String, ScraperResult)>) -> GigResults {
        let mut results = GigResults::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (scraper_name, result) in scraper_results {
            if let Some(error) = result.error {
                results.add_error(scraper_name, error);
            }
            for job in result.jobs {
                if seen.insert(job.dedup_key()) {
                    results.gigs.push(job);
                }
            }
        }

        // Stable: insertion order breaks posted_at ties.
        results.gigs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        results.count = results.gigs.len();
        results
    }
}
