//! Scraper trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{GigQuery, Job, Platform, Result, ScraperResult};

/// Configuration for a marketplace scraper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Display name of the scraper.
    pub name: String,
    /// Short identifier (e.g., "rok" for RemoteOK).
    pub shortcut: String,
    /// Marketplace this scraper targets.
    #[serde(default = "default_platform")]
    pub platform: Platform,
    /// Per-call result cap, bounding upstream cost and latency.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Whether the scraper is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_platform() -> Platform {
    Platform::Other
}

fn default_max_results() -> usize {
    5
}

fn default_timeout() -> u64 {
    5
}

fn default_enabled() -> bool {
    true
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            shortcut: String::new(),
            platform: Platform::Other,
            max_results: 5,
            timeout: 5,
            enabled: true,
        }
    }
}

/// Trait for implementing marketplace scrapers.
///
/// Implementors provide [`Scraper::fetch`]; the provided [`Scraper::search`]
/// wraps it into the never-failing calling contract the aggregator relies
/// on. Scrapers hold no mutable state and are safe to call concurrently.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the scraper configuration.
    fn config(&self) -> &ScraperConfig;

    /// Fetches and normalizes listings from the upstream service.
    ///
    /// May fail; failures are absorbed by [`Scraper::search`].
    async fn fetch(&self, query: &GigQuery) -> Result<Vec<Job>>;

    /// Synthetic placeholder jobs substituted when `fetch` fails.
    ///
    /// Defaults to none. Implementations that return placeholders must tag
    /// them `fallback` so consumers can tell them from real data.
    fn fallback_jobs(&self, _query: &GigQuery) -> Vec<Job> {
        Vec::new()
    }

    /// Performs a search, never propagating a fault.
    ///
    /// Any internal failure becomes `ScraperResult { jobs, error }` with
    /// advisory error text; results are capped at `max_results`.
    async fn search(&self, query: &GigQuery) -> ScraperResult {
        match self.fetch(query).await {
            Ok(mut jobs) => {
                jobs.truncate(self.config().max_results);
                ScraperResult::ok(jobs)
            }
            Err(e) => {
                warn!("Scraper {} failed: {}", self.name(), e);
                ScraperResult::failed(self.fallback_jobs(query), e.to_string())
            }
        }
    }

    /// Returns the scraper name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the scraper shortcut.
    fn shortcut(&self) -> &str {
        &self.config().shortcut
    }

    /// Returns the target marketplace.
    fn platform(&self) -> Platform {
        self.config().platform
    }

    /// Returns whether the scraper is enabled.
    fn is_enabled(&self) -> bool {
        self.config().enabled
    }
}
