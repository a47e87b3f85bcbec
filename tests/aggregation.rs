//! End-to-end aggregation tests using mock scrapers, plus network tests
//! against the real marketplaces.
//!
//! Network tests are `#[ignore]`d by default because they require network
//! access and may be slow or flaky.
//!
//! Run with: `cargo test --test aggregation -- --ignored`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use gig_search::{
    GigError, GigQuery, GigSearch, Job, JobStore, MemoryStore, PagedSearch, Platform, Result,
    Scraper, ScraperConfig,
};

struct StubScraper {
    config: ScraperConfig,
    jobs: Vec<Job>,
    calls: Arc<AtomicUsize>,
}

impl StubScraper {
    fn new(name: &str, jobs: Vec<Job>) -> Self {
        Self {
            config: ScraperConfig {
                name: name.to_string(),
                shortcut: name.to_string(),
                max_results: 50,
                ..Default::default()
            },
            jobs,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Scraper for StubScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn fetch(&self, _query: &GigQuery) -> Result<Vec<Job>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.jobs.clone())
    }
}

struct FaultyScraper {
    config: ScraperConfig,
}

impl FaultyScraper {
    fn new(name: &str) -> Self {
        Self {
            config: ScraperConfig {
                name: name.to_string(),
                shortcut: name.to_string(),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl Scraper for FaultyScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn fetch(&self, _query: &GigQuery) -> Result<Vec<Job>> {
        Err(GigError::Other("marketplace unreachable".to_string()))
    }
}

fn job(platform: Platform, id: &str) -> Job {
    Job::new(platform, id).with_title(format!("Gig {}", id))
}

#[tokio::test]
async fn empty_query_returns_empty_and_invokes_no_scraper() {
    let scraper = StubScraper::new("a", vec![job(Platform::Upwork, "1")]);
    let calls = Arc::clone(&scraper.calls);

    let mut search = GigSearch::new();
    search.add_scraper(scraper);

    for blank in ["", "   ", "\t\n"] {
        let results = search.search(GigQuery::new(blank)).await.unwrap();
        assert_eq!(results.count, 0);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_two_jobs_share_a_dedup_key() {
    let mut search = GigSearch::new();
    search.add_scraper(StubScraper::new(
        "a",
        vec![
            job(Platform::Upwork, "1"),
            job(Platform::Upwork, "1"),
            job(Platform::Upwork, "2"),
        ],
    ));
    search.add_scraper(StubScraper::new(
        "b",
        vec![job(Platform::Upwork, "2"), job(Platform::Fiverr, "3")],
    ));

    let results = search.search(GigQuery::new("test")).await.unwrap();

    let mut keys: Vec<String> = results.items().iter().map(|j| j.dedup_key()).collect();
    keys.sort();
    let before = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), before);
    assert_eq!(results.count, 3);
}

#[tokio::test]
async fn results_sorted_by_posted_at_descending() {
    let now = Utc::now();
    let mut search = GigSearch::new();
    // Deliberately shuffled input timestamps: T-1h, T, T-1d.
    search.add_scraper(StubScraper::new(
        "a",
        vec![
            job(Platform::Upwork, "hour").with_posted_at(now - ChronoDuration::hours(1)),
            job(Platform::Fiverr, "now").with_posted_at(now),
            job(Platform::Freelancer, "day").with_posted_at(now - ChronoDuration::days(1)),
        ],
    ));

    let results = search.search(GigQuery::new("test")).await.unwrap();

    let order: Vec<&str> = results
        .items()
        .iter()
        .map(|j| j.external_id.as_str())
        .collect();
    assert_eq!(order, vec!["now", "hour", "day"]);

    for pair in results.items().windows(2) {
        assert!(pair[0].posted_at >= pair[1].posted_at);
    }
}

#[tokio::test]
async fn partial_failure_keeps_other_scrapers_jobs() {
    let mut search = GigSearch::new();
    search.add_scraper(FaultyScraper::new("down"));
    search.add_scraper(StubScraper::new(
        "up",
        vec![job(Platform::RemoteOk, "1"), job(Platform::RemoteOk, "2")],
    ));

    let results = search.search(GigQuery::new("test")).await.unwrap();

    assert_eq!(results.count, 2);
    assert!(results
        .items()
        .iter()
        .all(|j| j.platform == Platform::RemoteOk));
    assert_eq!(results.errors.len(), 1);
    assert_eq!(results.errors[0].0, "down");
}

#[tokio::test]
async fn same_external_id_on_two_platforms_both_survive() {
    let mut search = GigSearch::new();
    search.add_scraper(StubScraper::new("a", vec![job(Platform::Upwork, "123")]));
    search.add_scraper(StubScraper::new("b", vec![job(Platform::Fiverr, "123")]));

    let results = search.search(GigQuery::new("test")).await.unwrap();
    assert_eq!(results.count, 2);
}

#[tokio::test]
async fn duplicate_within_one_scraper_collapses() {
    let mut search = GigSearch::new();
    search.add_scraper(StubScraper::new(
        "a",
        vec![job(Platform::Freelancer, "dup"), job(Platform::Freelancer, "dup")],
    ));

    let results = search.search(GigQuery::new("test")).await.unwrap();
    assert_eq!(results.count, 1);
}

#[tokio::test]
async fn page_two_reads_offset_fifty_without_fanout() {
    let scraper = StubScraper::new("a", vec![job(Platform::Upwork, "1")]);
    let calls = Arc::clone(&scraper.calls);
    let mut search = GigSearch::new();
    search.add_scraper(scraper);

    let store = Arc::new(MemoryStore::new());
    let batch: Vec<Job> = (0..60)
        .map(|i| Job::new(Platform::Upwork, format!("j{}", i)).with_title("Rust gig"))
        .collect();
    store.write(&batch).await.unwrap();

    let coordinator = PagedSearch::new(search, store).with_limit(50);
    let page = coordinator
        .page(&GigQuery::new("rust").with_page(2))
        .await
        .unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.gigs.len(), 10);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn short_page_means_no_more_results() {
    let mut search = GigSearch::new();
    search.add_scraper(StubScraper::new("a", vec![]));

    let store = Arc::new(MemoryStore::new());
    let batch: Vec<Job> = (0..55)
        .map(|i| Job::new(Platform::Upwork, format!("j{}", i)).with_title("Rust gig"))
        .collect();
    store.write(&batch).await.unwrap();

    let coordinator = PagedSearch::new(search, store).with_limit(50);

    let first = coordinator
        .page(&GigQuery::new("rust").with_page(1))
        .await
        .unwrap();
    assert_eq!(first.gigs.len(), 50);
    assert!(first.has_more);

    let second = coordinator
        .page(&GigQuery::new("rust").with_page(2))
        .await
        .unwrap();
    assert_eq!(second.gigs.len(), 5);
    assert!(!second.has_more);
}

#[tokio::test]
async fn refresh_results_become_visible_to_later_pages() {
    let mut search = GigSearch::new();
    search.add_scraper(StubScraper::new(
        "a",
        vec![job(Platform::Upwork, "1").with_title("Rust gig")],
    ));

    let store = Arc::new(MemoryStore::new());
    let coordinator = PagedSearch::new(search, store);

    let cold = coordinator.page(&GigQuery::new("rust")).await.unwrap();
    assert!(cold.gigs.is_empty());
    assert!(cold.pending);

    coordinator.refresh("rust").await.unwrap();

    let warm = coordinator.page(&GigQuery::new("rust")).await.unwrap();
    assert_eq!(warm.gigs.len(), 1);
    assert!(!warm.pending);
}

mod network {
    //! Live marketplace tests; shapes drift, so only smoke assertions.

    use super::*;
    use gig_search::scrapers::{Freelancer, RemoteOk};

    #[tokio::test]
    #[ignore]
    async fn remoteok_live_search() {
        let scraper = RemoteOk::new();
        let result = scraper.search(&GigQuery::new("rust")).await;
        println!(
            "RemoteOK returned {} jobs (error: {:?})",
            result.jobs.len(),
            result.error
        );
        for job in result.jobs.iter().take(3) {
            println!("  {} - {}", job.title, job.link);
        }
    }

    #[tokio::test]
    #[ignore]
    async fn freelancer_live_search() {
        let scraper = Freelancer::new();
        let result = scraper.search(&GigQuery::new("logo design")).await;
        println!(
            "Freelancer returned {} jobs (error: {:?})",
            result.jobs.len(),
            result.error
        );
        assert!(result.jobs.iter().all(|j| j.platform == Platform::Freelancer));
    }

    #[tokio::test]
    #[ignore]
    async fn full_fanout_live() {
        let mut search = GigSearch::new();
        search.add_scraper(Freelancer::new());
        search.add_scraper(RemoteOk::new());

        let results = search.search(GigQuery::new("rust")).await.unwrap();
        println!(
            "Fan-out returned {} gigs in {}ms ({} scraper errors)",
            results.count,
            results.duration_ms,
            results.errors.len()
        );
    }
}
