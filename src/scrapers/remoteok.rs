//! RemoteOK scraper using the public JSON API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

use crate::normalize::{normalize, RawJob};
use crate::{GigQuery, Job, Platform, Result, Scraper, ScraperConfig};

/// RemoteOK scraper.
///
/// The API returns a legal-notice object as the first array element and
/// job entries after it; entries without a `slug` are skipped.
pub struct RemoteOk {
    config: ScraperConfig,
    client: Client,
}

impl RemoteOk {
    /// Creates a new RemoteOK scraper.
    pub fn new() -> Self {
        Self {
            config: ScraperConfig {
                name: "RemoteOK".to_string(),
                shortcut: "rok".to_string(),
                platform: Platform::RemoteOk,
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

    fn parse_items(&self, query: &str, items: Vec<RemoteOkItem>) -> Vec<Job> {
        items
            .into_iter()
            .filter(|item| item.slug.is_some())
            .map(|item| {
                let title = match (&item.position, &item.company) {
                    (Some(position), Some(company)) if !company.is_empty() => {
                        Some(format!("{} at {}", position, company))
                    }
                    (Some(position), _) => Some(position.clone()),
                    _ => None,
                };

                let budget = item
                    .salary
                    .as_deref()
                    .and_then(extract_salary)
                    .or_else(|| item.location.as_deref().and_then(extract_salary))
                    .or_else(|| item.tags.iter().find_map(|t| extract_salary(t)));

                let description = item.description.map(|d| truncate(&d, 300));
                let posted_at = item
                    .date
                    .as_deref()
                    .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                    .map(|d| d.with_timezone(&Utc));

                let raw = RawJob {
                    external_id: item.id,
                    title,
                    description,
                    link: item.url,
                    budget,
                    posted_at,
                    tags: item.tags,
                };
                normalize(Platform::RemoteOk, query, raw)
            })
            .collect()
    }
}

impl Default for RemoteOk {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct RemoteOkItem {
    slug: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    id: Option<String>,
    position: Option<String>,
    company: Option<String>,
    url: Option<String>,
    description: Option<String>,
    salary: Option<String>,
    location: Option<String>,
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// The API serves ids as either numbers or strings.
fn de_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}

#[async_trait]
impl Scraper for RemoteOk {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn fetch(&self, query: &GigQuery) -> Result<Vec<Job>> {
        let tag = query.query.trim().to_lowercase().replace(' ', "-");
        let url = format!("https://remoteok.com/api?tag={}", urlencoding::encode(&tag));

        let response = self.client.get(&url).send().await?;
        let items: Vec<RemoteOkItem> = response.json().await?;

        Ok(self.parse_items(&query.query, items))
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Extracts a salary pattern from free text.
///
/// Recognizes symbol-prefixed amounts and ranges (`$60k`, `$50,000 -
/// $80,000`), code-suffixed amounts (`60k EUR`), and short tag-like
/// strings that carry a currency symbol and a digit.
pub(crate) fn extract_salary(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let symbol_re = Regex::new(
        r"(?i)[$€£¥]\s*\d+(?:,\d+)*k?(?:\s*-\s*[$€£¥]?\s*\d+(?:,\d+)*k?)?",
    )
    .ok()?;
    if let Some(m) = symbol_re.find(text) {
        return Some(m.as_str().to_string());
    }

    let code_re = Regex::new(r"(?i)\d+(?:,\d+)*k?\s*(?:USD|EUR|GBP|CAD|AUD)").ok()?;
    if let Some(m) = code_re.find(text) {
        return Some(m.as_str().to_string());
    }

    if text.len() < 20
        && text.chars().any(|c| "$€£".contains(c))
        && text.chars().any(|c| c.is_ascii_digit())
    {
        return Some(text.to_string());
    }

    None
}
