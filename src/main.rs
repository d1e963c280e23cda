//! # Wiki Crawler
//!
//! Fetches a fixed list of Wikipedia articles, extracts each page's title,
//! lead section and infobox image, and stores one row per article in the
//! MariaDB table `wiki_articles`.
//!
//! ## Usage
//!
//! ```sh
//! MARIADB_HOST=127.0.0.1 wiki_crawler
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pipeline:
//! 1. **Readiness**: Probe MariaDB with backoff until it accepts connections
//! 2. **Listing**: Take the fixed crawl list
//! 3. **Fetching**: Download and parse each page in turn
//! 4. **Storing**: Insert each extracted article over its own connection
//!
//! Failures on a single page are logged and skipped; the exit code does not
//! reflect them.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod models;
mod pipeline;
mod readiness;
mod scrapers;
mod storage;
#[cfg(test)]
mod test_utils;
mod utils;

use cli::Cli;
use pipeline::Pipeline;
use scrapers::HttpFetcher;
use scrapers::wikipedia::WikiScraper;
use storage::mariadb::MariaDbConnector;
use storage::{DbConfig, Persister};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("wiki_crawler starting up");

    let args = Cli::parse();
    debug!(
        host = %args.db_host,
        database = %args.db_name,
        user = %args.db_user,
        "Parsed CLI arguments"
    );

    let fetcher = HttpFetcher::new(Duration::from_secs(args.request_timeout_secs))?;
    let connector = MariaDbConnector::new(&DbConfig::from(&args));
    let pipeline = Pipeline::new(WikiScraper::new(fetcher), Persister::new(connector))
        .with_ready_attempts(args.ready_attempts);

    let summary = pipeline.run().await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        saved = summary.saved,
        total = summary.total,
        "Execution complete"
    );

    Ok(())
}
