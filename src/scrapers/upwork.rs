//! Upwork scraper via a hosted-scraper (Apify actor) JSON API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::normalize::{normalize, RawJob};
use crate::{GigError, GigQuery, Job, Platform, Result, Scraper, ScraperConfig};

const ACTOR: &str = "trudax~upwork-scraper";

/// Upwork scraper.
///
/// Upwork has no public search API, so listings come from a hosted
/// scraper actor run synchronously. Requires an API token.
pub struct Upwork {
    config: ScraperConfig,
    client: Client,
    token: Option<String>,
}

impl Upwork {
    /// Creates a new Upwork scraper without a token; [`Upwork::with_token`]
    /// must be called before searches can succeed.
    pub fn new() -> Self {
        Self {
            config: ScraperConfig {
                name: "Upwork".to_string(),
                shortcut: "upw".to_string(),
                platform: Platform::Upwork,
                max_results: 5,
                timeout: 5,
                enabled: true,
            },
            client: Client::builder()
                .user_agent("Mozilla/5.0 (compatible; gig-search/0.3)")
                .build()
                .expect("Failed to create HTTP client"),
            token: None,
        }
    }

    /// Sets the hosted-scraper API token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    fn parse_items(&self, query: &str, items: Vec<UpworkItem>) -> Vec<Job> {
        items
            .into_iter()
            .map(|item| {
                let external_id = item.id.or_else(|| item.ciphertext.clone());
                let link = item.url.or_else(|| {
                    item.ciphertext
                        .as_ref()
                        .map(|c| format!("https://www.upwork.com/jobs/{}", c))
                });
                let posted_at = item
                    .posted_date
                    .or(item.published_on)
                    .as_deref()
                    .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                    .map(|d| d.with_timezone(&Utc));

                let raw = RawJob {
                    external_id,
                    title: item.title,
                    description: item.description.or(item.snippet),
                    link,
                    budget: item.budget.or(item.amount),
                    posted_at,
                    tags: item.skills,
                };
                normalize(Platform::Upwork, query, raw)
            })
            .collect()
    }
}

impl Default for Upwork {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpworkItem {
    id: Option<String>,
    ciphertext: Option<String>,
    title: Option<String>,
    description: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
    budget: Option<String>,
    amount: Option<String>,
    posted_date: Option<String>,
    published_on: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
}

#[async_trait]
impl Scraper for Upwork {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn fetch(&self, query: &GigQuery) -> Result<Vec<Job>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| GigError::MissingToken(self.name().to_string()))?;

        let url = format!(
            "https://api.apify.com/v2/acts/{}/run-sync-get-dataset-items?token={}",
            ACTOR, token
        );
        let body = json!({
            "search": query.query,
            "limit": self.config.max_results,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let items: Vec<UpworkItem> = response.json().await?;

        Ok(self.parse_items(&query.query, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upwork_new() {
        let scraper = Upwork::new();
        assert_eq!(scraper.name(), "Upwork");
        assert_eq!(scraper.shortcut(), "upw");
        assert_eq!(scraper.platform(), Platform::Upwork);
        assert!(scraper.token.is_none());
    }

    #[test]
    fn test_upwork_with_token() {
        let scraper = Upwork::new().with_token("secret");
        assert_eq!(scraper.token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_fetch_without_token_fails() {
        let scraper = Upwork::new();
        let result = scraper.fetch(&GigQuery::new("rust")).await;
        assert!(matches!(result, Err(GigError::MissingToken(_))));
    }

    #[tokio::test]
    async fn test_search_without_token_degrades_to_advisory_error() {
        let scraper = Upwork::new();
        let result = scraper.search(&GigQuery::new("rust")).await;
        assert!(result.jobs.is_empty());
        assert!(result.error.unwrap().contains("missing an API token"));
    }

    #[test]
    fn test_parse_items_full_record() {
        let json = r#"[{
            "id": "job-1",
            "title": "Rust backend",
            "description": "Build a service",
            "url": "https://www.upwork.com/jobs/job-1",
            "budget": "$40/hr",
            "postedDate": "2025-03-01T10:00:00+00:00",
            "skills": ["rust", "tokio"]
        }]"#;
        let items: Vec<UpworkItem> = serde_json::from_str(json).unwrap();
        let jobs = Upwork::new().parse_items("rust", items);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].external_id, "job-1");
        assert_eq!(jobs[0].id, "upwork-job-1");
        assert_eq!(jobs[0].budget, "$40/hr");
        assert!(jobs[0].tags.iter().any(|t| t == "tokio"));
    }

    #[test]
    fn test_parse_items_ciphertext_fallbacks() {
        let json = r#"[{"ciphertext": "~abc", "title": "Gig", "snippet": "Snip"}]"#;
        let items: Vec<UpworkItem> = serde_json::from_str(json).unwrap();
        let jobs = Upwork::new().parse_items("q", items);

        assert_eq!(jobs[0].external_id, "~abc");
        assert_eq!(jobs[0].link, "https://www.upwork.com/jobs/~abc");
        assert_eq!(jobs[0].description, "Snip");
    }

    #[test]
    fn test_parse_items_missing_id_is_deterministic() {
        let json = r#"[{"title": "Gig", "url": "https://example.com/g"}]"#;
        let items: Vec<UpworkItem> = serde_json::from_str(json).unwrap();
        let a = Upwork::new().parse_items("q", items);

        let items: Vec<UpworkItem> = serde_json::from_str(json).unwrap();
        let b = Upwork::new().parse_items("q", items);

        assert_eq!(a[0].external_id, b[0].external_id);
    }

    #[test]
    fn test_parse_items_published_on_fallback() {
        let json = r#"[{"id": "1", "publishedOn": "2025-02-01T00:00:00Z"}]"#;
        let items: Vec<UpworkItem> = serde_json::from_str(json).unwrap();
        let jobs = Upwork::new().parse_items("q", items);
        assert_eq!(jobs[0].posted_at.to_rfc3339(), "2025-02-01T00:00:00+00:00");
    }
}
