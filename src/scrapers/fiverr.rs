//! Fiverr scraper via a hosted-scraper (Apify actor) JSON API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::normalize::{normalize, RawJob};
use crate::{GigError, GigQuery, Job, Platform, Result, Scraper, ScraperConfig};

const ACTOR: &str = "trudax~fiverr-scraper";

/// Fiverr scraper.
///
/// Fiverr gigs carry no posting date, so jobs get fetch time (a
/// documented precision loss). On failure this scraper substitutes
/// placeholder gigs tagged `fallback` so the result set stays non-empty.
pub struct Fiverr {
    config: ScraperConfig,
    client: Client,
    token: Option<String>,
}

impl Fiverr {
    /// Creates a new Fiverr scraper without a token; [`Fiverr::with_token`]
    /// must be called before searches can succeed.
    pub fn new() -> Self {
        Self {
            config: ScraperConfig {
                name: "Fiverr".to_string(),
                shortcut: "fvr".to_string(),
                platform: Platform::Fiverr,
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

    fn parse_items(&self, query: &str, items: Vec<FiverrItem>) -> Vec<Job> {
        items
            .into_iter()
            .map(|item| {
                let description = item.seller_name.as_ref().map(|seller| {
                    format!(
                        "Seller: {} - {} stars ({} reviews)",
                        seller,
                        item.rating.unwrap_or(0.0),
                        item.rating_count.unwrap_or(0)
                    )
                });

                let raw = RawJob {
                    external_id: item.id,
                    title: item.title,
                    description,
                    link: item.url.or_else(|| Some("https://www.fiverr.com".to_string())),
                    budget: item.price.or_else(|| Some("See Gig".to_string())),
                    posted_at: None,
                    tags: vec!["gig".to_string()],
                };
                normalize(Platform::Fiverr, query, raw)
            })
            .collect()
    }
}

impl Default for Fiverr {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FiverrItem {
    id: Option<String>,
    title: Option<String>,
    seller_name: Option<String>,
    rating: Option<f64>,
    rating_count: Option<u64>,
    url: Option<String>,
    price: Option<String>,
}

#[async_trait]
impl Scraper for Fiverr {
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
        let items: Vec<FiverrItem> = response.json().await?;

        Ok(self.parse_items(&query.query, items))
    }

    fn fallback_jobs(&self, query: &GigQuery) -> Vec<Job> {
        let term = query.query.trim();
        ["I will help with", "Expert services for"]
            .iter()
            .map(|lead| {
                let raw = RawJob {
                    external_id: None,
                    title: Some(format!("{} {}", lead, term)),
                    description: Some(
                        "Placeholder gig shown while Fiverr results are unavailable.".to_string(),
                    ),
                    link: Some("https://www.fiverr.com".to_string()),
                    budget: Some("See Gig".to_string()),
                    posted_at: None,
                    tags: vec!["gig".to_string(), "fallback".to_string()],
                };
                normalize(Platform::Fiverr, term, raw)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiverr_new() {
        let scraper = Fiverr::new();
        assert_eq!(scraper.name(), "Fiverr");
        assert_eq!(scraper.shortcut(), "fvr");
        assert_eq!(scraper.platform(), Platform::Fiverr);
    }

    #[test]
    fn test_parse_items_synthesizes_description() {
        let json = r#"[{
            "id": "gig-9",
            "title": "I will design a logo",
            "sellerName": "artpro",
            "rating": 4.9,
            "ratingCount": 210,
            "url": "https://www.fiverr.com/artpro/design",
            "price": "$50"
        }]"#;
        let items: Vec<FiverrItem> = serde_json::from_str(json).unwrap();
        let jobs = Fiverr::new().parse_items("logo", items);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].external_id, "gig-9");
        assert_eq!(jobs[0].description, "Seller: artpro - 4.9 stars (210 reviews)");
        assert_eq!(jobs[0].budget, "$50");
        assert!(jobs[0].tags.iter().any(|t| t == "gig"));
    }

    #[test]
    fn test_parse_items_defaults() {
        let json = r#"[{"id": "1", "title": "Gig"}]"#;
        let items: Vec<FiverrItem> = serde_json::from_str(json).unwrap();
        let jobs = Fiverr::new().parse_items("q", items);

        assert_eq!(jobs[0].link, "https://www.fiverr.com");
        assert_eq!(jobs[0].budget, "See Gig");
        assert_eq!(jobs[0].description, "");
    }

    #[test]
    fn test_fallback_jobs_are_tagged_and_deterministic() {
        let scraper = Fiverr::new();
        let query = GigQuery::new("logo design");

        let a = scraper.fallback_jobs(&query);
        let b = scraper.fallback_jobs(&query);

        assert_eq!(a.len(), 2);
        assert!(a.iter().all(|j| j.is_fallback()));
        assert_eq!(a[0].external_id, b[0].external_id);
        assert_ne!(a[0].external_id, a[1].external_id);
    }

    #[tokio::test]
    async fn test_search_without_token_returns_fallback() {
        let scraper = Fiverr::new();
        let result = scraper.search(&GigQuery::new("logo")).await;

        assert!(result.error.is_some());
        assert_eq!(result.jobs.len(), 2);
        assert!(result.jobs.iter().all(|j| j.is_fallback()));
    }

    #[tokio::test]
    async fn test_fetch_without_token_fails() {
        let scraper = Fiverr::new();
        let result = scraper.fetch(&GigQuery::new("logo")).await;
        assert!(matches!(result, Err(GigError::MissingToken(_))));
    }
}
