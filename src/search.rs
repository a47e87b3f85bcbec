//! Search orchestration.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::{Aggregator, GigError, GigQuery, GigResults, Result, Scraper, ScraperResult};

/// Meta gig search that fans a query out across marketplace scrapers.
pub struct GigSearch {
    scrapers: Vec<Arc<dyn Scraper>>,
    aggregator: Aggregator,
    default_timeout: Duration,
}

impl GigSearch {
    /// Creates a new search instance.
    pub fn new() -> Self {
        Self {
            scrapers: Vec::new(),
            aggregator: Aggregator::new(),
            default_timeout: Duration::from_secs(5),
        }
    }

    /// Adds a marketplace scraper.
    pub fn add_scraper<S: Scraper + 'static>(&mut self, scraper: S) {
        self.scrapers.push(Arc::new(scraper));
    }

    /// Sets the fallback per-scraper timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.default_timeout = timeout;
    }

    /// Returns the number of configured scrapers.
    pub fn scraper_count(&self) -> usize {
        self.scrapers.len()
    }

    /// Performs a search across all configured scrapers.
    ///
    /// A blank query short-circuits to an empty result without invoking any
    /// scraper. The fan-out is best-effort: every scraper is started
    /// concurrently and the join waits for all of them to settle, so one
    /// slow or failing scraper never aborts the aggregation. A scraper
    /// exceeding its deadline is recorded as a failure for this call.
    pub async fn search(&self, query: GigQuery) -> Result<GigResults> {
        if self.scrapers.is_empty() {
            return Err(GigError::NoScrapers);
        }

        if query.is_blank() {
            debug!("Blank query, skipping fan-out");
            return Ok(GigResults::new());
        }

        let start = Instant::now();
        let query = Arc::new(query);

        let scrapers_to_use = self.select_scrapers(&query);
        debug!("Searching {} scrapers", scrapers_to_use.len());

        let futures: Vec<_> = scrapers_to_use
            .iter()
            .map(|scraper| {
                let scraper = Arc::clone(scraper);
                let query = Arc::clone(&query);
                let deadline = self.deadline_for(&scraper, &query);

                async move {
                    let name = scraper.name().to_string();
                    // Each call runs in its own task so a scraper panicking
                    // out-of-contract degrades to an advisory error instead
                    // of zeroing out the whole response.
                    let mut task = AbortOnDrop(tokio::spawn(async move {
                        timeout(deadline, scraper.search(&query)).await
                    }));
                    match (&mut task.0).await {
                        Ok(Ok(result)) => {
                            debug!(
                                "Scraper {} returned {} jobs (error: {:?})",
                                name,
                                result.jobs.len(),
                                result.error
                            );
                            (name, result)
                        }
                        Ok(Err(_)) => {
                            warn!("Scraper {} timed out after {:?}", name, deadline);
                            (name, ScraperResult::failed(vec![], GigError::Timeout.to_string()))
                        }
                        Err(e) => {
                            warn!("Scraper {} violated its contract: {}", name, e);
                            (
                                name,
                                ScraperResult::failed(vec![], format!("scraper defect: {}", e)),
                            )
                        }
                    }
                }
            })
            .collect();

        let results = join_all(futures).await;

        let mut gig_results = self.aggregator.aggregate(results);
        gig_results.set_duration(start.elapsed().as_millis() as u64);

        Ok(gig_results)
    }

    /// Resolves the deadline for one scraper call.
    fn deadline_for(&self, scraper: &Arc<dyn Scraper>, query: &GigQuery) -> Duration {
        if let Some(secs) = query.timeout_secs {
            return Duration::from_secs(secs);
        }
        let configured = scraper.config().timeout;
        if configured > 0 {
            Duration::from_secs(configured)
        } else {
            self.default_timeout
        }
    }

    /// Selects scrapers based on query parameters.
    fn select_scrapers(&self, query: &GigQuery) -> Vec<Arc<dyn Scraper>> {
        self.scrapers
            .iter()
            .filter(|scraper| {
                if !scraper.is_enabled() {
                    return false;
                }
                if !query.scrapers.is_empty() {
                    return query.scrapers.contains(&scraper.shortcut().to_string());
                }
                true
            })
            .cloned()
            .collect()
    }
}

/// Aborts the wrapped task when dropped, so cancelling a search also
/// cancels its in-flight scraper calls.
struct AbortOnDrop<T>(tokio::task::JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Default for GigSearch {
    fn default() -> Self {
        Self::new()
    }
}
