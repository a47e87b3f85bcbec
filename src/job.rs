//! Canonical gig listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace a listing originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Upwork,
    Fiverr,
    Freelancer,
    RemoteOk,
    Other,
}

impl Platform {
    /// Display name of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Upwork => "Upwork",
            Platform::Fiverr => "Fiverr",
            Platform::Freelancer => "Freelancer",
            Platform::RemoteOk => "RemoteOK",
            Platform::Other => "Other",
        }
    }

    /// Lowercase slug used as an id prefix.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Upwork => "upwork",
            Platform::Fiverr => "fiverr",
            Platform::Freelancer => "freelancer",
            Platform::RemoteOk => "remoteok",
            Platform::Other => "other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single freelance gig listing in canonical form.
///
/// Constructed fresh by a scraper for each search call and immutable
/// thereafter. `(platform, external_id)` uniquely identifies a listing
/// within one aggregation; `id` is a derived display handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Derived handle, `"{platform_slug}-{external_id}"`.
    pub id: String,
    /// Source marketplace.
    pub platform: Platform,
    /// Provider-native identifier, unique within a platform.
    pub external_id: String,
    /// Listing title.
    pub title: String,
    /// Listing description/snippet.
    pub description: String,
    /// URL of the original listing.
    pub link: String,
    /// Free-text compensation descriptor (fixed, hourly, range).
    pub budget: String,
    /// Posting timestamp; fetch time when the provider exposes none.
    pub posted_at: DateTime<Utc>,
    /// Free-text labels; carries at least the query term and platform name.
    pub tags: Vec<String>,
}

impl Job {
    /// Creates a new job with the derived id.
    pub fn new(platform: Platform, external_id: impl Into<String>) -> Self {
        let external_id = external_id.into();
        Self {
            id: format!("{}-{}", platform.slug(), external_id),
            platform,
            external_id,
            title: String::new(),
            description: String::new(),
            link: String::new(),
            budget: String::new(),
            posted_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the listing link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Sets the budget descriptor.
    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    /// Sets the posting timestamp.
    pub fn with_posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = posted_at;
        self
    }

    /// Sets the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Deduplication key, `"{platform}:{external_id}"`.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.platform.as_str(), self.external_id)
    }

    /// Whether this is a synthetic placeholder substituted on scraper failure.
    pub fn is_fallback(&self) -> bool {
        self.tags.iter().any(|t| t == "fallback")
    }
}

/// Outcome of a single scraper call.
///
/// The `error` field is advisory only; `jobs` (possibly empty) is always
/// consumable by the aggregator regardless of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperResult {
    pub jobs: Vec<Job>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScraperResult {
    /// A successful result with the given jobs.
    pub fn ok(jobs: Vec<Job>) -> Self {
        Self { jobs, error: None }
    }

    /// A failed result carrying advisory error text and any fallback jobs.
    pub fn failed(jobs: Vec<Job>, error: impl Into<String>) -> Self {
        Self {
            jobs,
            error: Some(error.into()),
        }
    }
}

/// Container for aggregated gig results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GigResults {
    /// Deduplicated, newest-first gig listings.
    pub gigs: Vec<Job>,
    /// Advisory per-scraper errors, `(scraper name, message)`.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<(String, String)>,
    /// Number of gigs.
    pub count: usize,
    /// Aggregation duration in milliseconds.
    pub duration_ms: u64,
}

impl GigResults {
    /// Creates a new empty result container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the gigs.
    pub fn items(&self) -> &[Job] {
        &self.gigs
    }

    /// Records an advisory scraper error.
    pub fn add_error(&mut self, scraper: impl Into<String>, message: impl Into<String>) {
        self.errors.push((scraper.into(), message.into()));
    }

    /// Sets the aggregation duration.
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }
}

/// One page of stored gig results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GigPage {
    pub gigs: Vec<Job>,
    /// 1-indexed page number.
    pub page: u32,
    pub limit: usize,
    /// False once a page comes back short of `limit`.
    pub has_more: bool,
    /// True when page 1 hit a cold cache and a refresh is in flight.
    pub pending: bool,
}
