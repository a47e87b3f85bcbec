//! Search query representation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A gig search query with all parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GigQuery {
    /// The search terms.
    pub query: String,
    /// Page number (1-indexed); only meaningful for paginated reads.
    pub page: u32,
    /// Specific scrapers to use (by shortcut); empty means all.
    pub scrapers: Vec<String>,
    /// Per-scraper deadline override in seconds.
    pub timeout_secs: Option<u64>,
}

impl GigQuery {
    /// Creates a new query with the given terms.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            scrapers: Vec::new(),
            timeout_secs: None,
        }
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets specific scrapers to use.
    pub fn with_scrapers(mut self, scrapers: Vec<String>) -> Self {
        self.scrapers = scrapers;
        self
    }

    /// Overrides the per-scraper deadline for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Whether the query text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}
