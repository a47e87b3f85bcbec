//! Gig Search CLI - freelance-gig meta search command line interface.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gig_search::{
    scrapers::{Fiverr, Freelancer, RemoteOk, Upwork},
    GigQuery, GigSearch,
};

/// Gig Search - freelance-gig meta search CLI
#[derive(Parser)]
#[command(name = "gig-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search gigs across marketplaces
    Search(SearchArgs),

    /// List available marketplace scrapers
    Scrapers,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Scrapers to use (comma-separated)
    /// Available: upw, fvr, flr, rok
    #[arg(short, long, value_delimiter = ',')]
    scrapers: Option<Vec<String>>,

    /// Maximum number of gigs to display
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Per-scraper timeout in seconds
    #[arg(short, long, default_value = "5")]
    timeout: u64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Hosted-scraper API token (for Upwork and Fiverr)
    #[arg(long, env = "GIG_SEARCH_API_TOKEN")]
    token: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output ({"gigs": [...]})
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Scrapers => list_scrapers(),
    }
}

fn list_scrapers() -> Result<()> {
    println!("Available marketplace scrapers:\n");
    println!("  upw  - Upwork (hosted scraper, needs --token)");
    println!("  fvr  - Fiverr (hosted scraper, needs --token)");
    println!("  flr  - Freelancer (public listing pages)");
    println!("  rok  - RemoteOK (public JSON API)");
    println!();
    println!("Usage: gig-search search \"query\" -s flr,rok");
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let mut search = GigSearch::new();
    search.set_timeout(Duration::from_secs(args.timeout));

    let shortcuts: Vec<String> = args
        .scrapers
        .unwrap_or_else(|| vec!["flr".to_string(), "rok".to_string()]);

    for shortcut in &shortcuts {
        match shortcut.as_str() {
            "upw" | "upwork" => {
                let mut scraper = Upwork::new();
                if let Some(token) = &args.token {
                    scraper = scraper.with_token(token);
                }
                search.add_scraper(scraper);
            }
            "fvr" | "fiverr" => {
                let mut scraper = Fiverr::new();
                if let Some(token) = &args.token {
                    scraper = scraper.with_token(token);
                }
                search.add_scraper(scraper);
            }
            "flr" | "freelancer" => search.add_scraper(Freelancer::new()),
            "rok" | "remoteok" => search.add_scraper(RemoteOk::new()),
            _ => {
                eprintln!("Warning: Unknown scraper '{}', skipping", shortcut);
            }
        }
    }

    if search.scraper_count() == 0 {
        anyhow::bail!("No valid scrapers specified");
    }

    let query = GigQuery::new(&args.query).with_timeout(Duration::from_secs(args.timeout));
    let results = search.search(query).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nGigs for \"{}\" ({} results in {}ms):\n",
                args.query, results.count, results.duration_ms
            );

            for (i, gig) in results.items().iter().take(args.limit).enumerate() {
                println!("{}. {} [{}]", i + 1, gig.title, gig.platform);
                println!("   Link: {}", gig.link);
                println!("   Budget: {} | Posted: {}", gig.budget, gig.posted_at.to_rfc3339());
                if !gig.description.is_empty() {
                    let description = if gig.description.chars().count() > 150 {
                        let cut: String = gig.description.chars().take(150).collect();
                        format!("{}...", cut)
                    } else {
                        gig.description.clone()
                    };
                    println!("   {}", description);
                }
                println!();
            }

            for (scraper, error) in &results.errors {
                eprintln!("Warning: {} failed: {}", scraper, error);
            }
        }
        OutputFormat::Json => {
            let mut trimmed = results.clone();
            trimmed.gigs.truncate(args.limit);
            trimmed.count = trimmed.gigs.len();
            println!("{}", serde_json::to_string_pretty(&trimmed)?);
        }
        OutputFormat::Compact => {
            for gig in results.items().iter().take(args.limit) {
                println!("{}\t{}\t{}", gig.platform, gig.title, gig.link);
            }
        }
    }

    Ok(())
}
