//! # gig-search
//!
//! An embeddable meta search library for freelance-gig marketplaces.
//!
//! This library aggregates gig listings from multiple marketplaces into
//! one ranked, deduplicated result set, with support for:
//!
//! - Async parallel scraper fan-out with per-scraper timeouts
//! - Per-scraper failure isolation (a failing marketplace never breaks
//!   the aggregation)
//! - Cross-marketplace record normalization and deduplication
//! - Optional cache-first pagination over a storage collaborator
//!
//! ## Example
//!
//! ```rust,no_run
//! use gig_search::{GigQuery, GigSearch, scrapers::{Freelancer, RemoteOk}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut search = GigSearch::new();
//!     search.add_scraper(Freelancer::new());
//!     search.add_scraper(RemoteOk::new());
//!
//!     let results = search.search(GigQuery::new("rust developer")).await?;
//!
//!     for gig in results.items() {
//!         println!("[{}] {}: {}", gig.platform, gig.title, gig.link);
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod coordinator;
mod error;
mod job;
mod query;
mod scraper;
mod search;
mod store;

pub mod normalize;
pub mod scrapers;

pub use aggregator::Aggregator;
pub use coordinator::PagedSearch;
pub use error::{GigError, Result};
pub use job::{GigPage, GigResults, Job, Platform, ScraperResult};
pub use query::GigQuery;
pub use scraper::{Scraper, ScraperConfig};
pub use search::GigSearch;
pub use store::{JobStore, MemoryStore};
