//! Storage collaborator seam for the paginated variant.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Job, Result};

/// Read/write contract for the external gig store.
///
/// The core only needs these two operations; the actual schema, TTL, and
/// eviction policy belong to the collaborator behind this trait. `write`
/// has upsert semantics on `(platform, external_id)` and reports how many
/// records were new.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Reads stored jobs matching `query`, newest first, at the given window.
    async fn read(&self, query: &str, limit: usize, offset: usize) -> Result<Vec<Job>>;

    /// Upserts jobs, returning the number of newly inserted records.
    async fn write(&self, jobs: &[Job]) -> Result<usize>;
}

/// In-memory store, suitable for tests and single-process use.
#[derive(Default)]
pub struct MemoryStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

/// Keyword match: any query word longer than 2 chars appears in the
/// title or description, case-insensitively. A query with no usable
/// keywords matches everything.
fn matches_query(job: &Job, query: &str) -> bool {
    let keywords: Vec<String> = query
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(|w| w.to_lowercase())
        .collect();
    if keywords.is_empty() {
        return true;
    }
    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();
    keywords
        .iter()
        .any(|w| title.contains(w.as_str()) || description.contains(w.as_str()))
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn read(&self, query: &str, limit: usize, offset: usize) -> Result<Vec<Job>> {
        let jobs = self.jobs.read().await;
        let mut matched: Vec<Job> = jobs
            .iter()
            .filter(|j| matches_query(j, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn write(&self, new_jobs: &[Job]) -> Result<usize> {
        let mut jobs = self.jobs.write().await;
        let mut added = 0;
        for job in new_jobs {
            let key = job.dedup_key();
            if !jobs.iter().any(|existing| existing.dedup_key() == key) {
                jobs.push(job.clone());
                added += 1;
            }
        }
        Ok(added)
    }
}
