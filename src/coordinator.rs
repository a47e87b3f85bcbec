//! Cache-first pagination over a [`JobStore`] collaborator.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{GigPage, GigQuery, GigSearch, JobStore, Result};

/// Serves paged gig results from storage, refreshing page 1 in the
/// background.
///
/// Page 1 is a read-through: whatever the store currently holds is
/// returned immediately while a fresh fan-out runs detached and writes its
/// results back for future reads. Pages ≥ 2 are pure offset reads and
/// never trigger a fan-out. Consistency is eventually-visible: a refresh
/// landing after the response went out is expected.
pub struct PagedSearch {
    search: Arc<GigSearch>,
    store: Arc<dyn JobStore>,
    limit: usize,
}

impl PagedSearch {
    /// Creates a coordinator over the given search and store.
    pub fn new(search: GigSearch, store: Arc<dyn JobStore>) -> Self {
        Self {
            search: Arc::new(search),
            store,
            limit: 50,
        }
    }

    /// Sets the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Returns the page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Serves one page for the query.
    ///
    /// A blank query yields an empty final page without touching the store
    /// or any scraper. Storage faults surface as
    /// [`GigError::StorageUnavailable`](crate::GigError::StorageUnavailable),
    /// never as an empty page.
    pub async fn page(&self, query: &GigQuery) -> Result<GigPage> {
        if query.is_blank() {
            return Ok(GigPage {
                gigs: Vec::new(),
                page: query.page,
                limit: self.limit,
                has_more: false,
                pending: false,
            });
        }

        let offset = (query.page.saturating_sub(1) as usize) * self.limit;
        let gigs = self.store.read(&query.query, self.limit, offset).await?;

        let pending = if query.page == 1 {
            self.spawn_refresh(query.query.clone());
            gigs.is_empty()
        } else {
            false
        };

        let has_more = gigs.len() == self.limit;
        Ok(GigPage {
            gigs,
            page: query.page,
            limit: self.limit,
            has_more,
            pending,
        })
    }

    /// Runs a full fan-out and writes the results back to the store.
    ///
    /// Returns the number of newly stored jobs.
    pub async fn refresh(&self, query: &str) -> Result<usize> {
        let results = self.search.search(GigQuery::new(query)).await?;
        let added = self.store.write(results.items()).await?;
        debug!(
            "Refresh for \"{}\" stored {} new of {} fetched",
            query, added, results.count
        );
        Ok(added)
    }

    /// Detaches a background refresh; its outcome is not owed to the
    /// current caller.
    fn spawn_refresh(&self, query: String) {
        let search = Arc::clone(&self.search);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match search.search(GigQuery::new(&query)).await {
                Ok(results) => {
                    if let Err(e) = store.write(results.items()).await {
                        warn!("Background refresh for \"{}\" failed to store: {}", query, e);
                    }
                }
                Err(e) => warn!("Background refresh for \"{}\" failed: {}", query, e),
            }
        });
    }
}
