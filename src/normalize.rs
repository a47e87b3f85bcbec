//! Normalization of provider-specific raw records into canonical [`Job`]s.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::{Job, Platform};

/// A provider record reduced to the fields the normalizer understands.
///
/// Scrapers map their provider payload into this shape; every field may be
/// absent and the normalizer supplies a default, so downstream code never
/// observes a missing field.
#[derive(Debug, Clone, Default)]
pub struct RawJob {
    pub external_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub budget: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

/// Converts a raw provider record into a canonical job.
///
/// Deterministic given identical input, with one documented precision
/// loss: a record without `posted_at` gets the current fetch time.
/// Records without an `external_id` get a deterministic digest of the
/// fields that are present, so identical failures produce identical,
/// dedupable ids.
pub fn normalize(platform: Platform, query: &str, raw: RawJob) -> Job {
    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "No Title".to_string());
    let link = raw.link.unwrap_or_default();

    let external_id = raw
        .external_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| derive_external_id(platform, &title, &link));

    let mut tags = raw.tags;
    let query = query.trim();
    if !query.is_empty() && !tags.iter().any(|t| t.eq_ignore_ascii_case(query)) {
        tags.push(query.to_string());
    }
    let platform_tag = platform.slug();
    if !tags.iter().any(|t| t.eq_ignore_ascii_case(platform_tag)) {
        tags.push(platform_tag.to_string());
    }

    Job::new(platform, external_id)
        .with_title(title)
        .with_description(raw.description.unwrap_or_default())
        .with_link(link)
        .with_budget(
            raw.budget
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| "Negotiable".to_string()),
        )
        .with_posted_at(raw.posted_at.unwrap_or_else(Utc::now))
        .with_tags(tags)
}

/// Derives a stable external id from whatever fields the provider gave us.
fn derive_external_id(platform: Platform, title: &str, link: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(platform.as_str().as_bytes());
    hasher.update(b"\x1f");
    hasher.update(title.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(link.as_bytes());
    hex::encode(&hasher.finalize()[..6])
}
