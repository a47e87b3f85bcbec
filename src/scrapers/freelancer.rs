//! Freelancer.com scraper over the public job-listing pages.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::normalize::{normalize, RawJob};
use crate::{GigError, GigQuery, Job, Platform, Result, Scraper, ScraperConfig};

/// Freelancer.com scraper.
///
/// Parses the server-rendered listing page for one result page; the
/// external id is the last path segment of the project link. Listing
/// cards carry no posting timestamp, so jobs get fetch time.
pub struct Freelancer {
    config: ScraperConfig,
    client: Client,
}

impl Freelancer {
    /// Creates a new Freelancer scraper.
    pub fn new() -> Self {
        Self {
            config: ScraperConfig {
                name: "Freelancer".to_string(),
                shortcut: "flr".to_string(),
                platform: Platform::Freelancer,
                max_results: 5,
                timeout: 5,
                enabled: true,
            },
            client: Client::builder()
                .user_agent("Mozilla/5.0 (compatible; gig-search/0.3)")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    fn parse_listing(&self, query: &str, html: &str) -> Result<Vec<Job>> {
        let document = Html::parse_document(html);
        let card_selector = selector(".JobSearchCard-item")?;
        let title_selector = selector(".JobSearchCard-primary-heading a")?;
        let price_selector = selector(".JobSearchCard-primary-price")?;
        let description_selector = selector(".JobSearchCard-primary-description")?;

        let mut jobs = Vec::new();

        for card in document.select(&card_selector) {
            let Some(title_elem) = card.select(&title_selector).next() else {
                continue;
            };
            let title = title_elem.text().collect::<String>().trim().to_string();
            let href = title_elem.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                continue;
            }

            let link = if href.starts_with("http") {
                href.to_string()
            } else {
                format!("https://www.freelancer.com{}", href)
            };
            let external_id = href
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .map(str::to_string);

            let budget = card
                .select(&price_selector)
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string());
            let description = card
                .select(&description_selector)
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string());

            let raw = RawJob {
                external_id,
                title: Some(title),
                description,
                link: Some(link),
                budget,
                posted_at: None,
                tags: Vec::new(),
            };
            jobs.push(normalize(Platform::Freelancer, query, raw));
        }

        Ok(jobs)
    }
}

impl Default for Freelancer {
    fn default() -> Self {
        Self::new()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GigError::Parse(format!("Failed to parse selector: {:?}", e)))
}

#[async_trait]
impl Scraper for Freelancer {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn fetch(&self, query: &GigQuery) -> Result<Vec<Job>> {
        let url = format!(
            "https://www.freelancer.com/jobs/{}/?keyword={}&status=open&s=new",
            query.page,
            urlencoding::encode(query.query.trim())
        );

        let response = self.client.get(&url).send().await?;
        let html = response.text().await?;

        self.parse_listing(&query.query, &html)
    }
}
