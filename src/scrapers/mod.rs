//! Page sources and the Wikipedia scraper.
//!
//! Scraping is split in two phases, as with any source:
//!
//! 1. **Listing**: [`get_crawl_list`] names the pages to visit
//! 2. **Fetching**: a [`PageFetcher`] downloads each page, and
//!    [`wikipedia::WikiScraper`] turns the HTML into an
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! The fetcher sits behind a trait so tests can serve canned HTML.

use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

pub mod wikipedia;

/// The pages crawled on every run, in order.
pub const CRAWL_LIST: [&str; 3] = [
    "https://en.wikipedia.org/wiki/Winged_Victory_of_Samothrace",
    "https://en.wikipedia.org/wiki/Girl_with_a_Pearl_Earring",
    "https://en.wikipedia.org/wiki/Elden_Ring",
];

/// Return the fixed crawl list.
pub fn get_crawl_list() -> Vec<String> {
    CRAWL_LIST.iter().map(|url| url.to_string()).collect()
}

/// Something that can download a page body.
pub trait PageFetcher {
    /// GET `url` and return the body text. Non-2xx statuses are errors.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client whose whole-request timeout is `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
