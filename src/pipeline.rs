//! The crawl loop: list, then crawl and save each URL in turn.
//!
//! A failure on one URL is logged and counted; it never stops the loop.

use crate::models::RunSummary;
use crate::readiness::wait_for_datastore;
use crate::scrapers::wikipedia::WikiScraper;
use crate::scrapers::{PageFetcher, get_crawl_list};
use crate::storage::{Connector, Persister};
use tracing::{debug, error, info, instrument};

/// Scraper and persister wired together.
#[derive(Debug)]
pub struct Pipeline<F, C> {
    scraper: WikiScraper<F>,
    persister: Persister<C>,
    ready_attempts: usize,
}

impl<F: PageFetcher, C: Connector> Pipeline<F, C> {
    pub fn new(scraper: WikiScraper<F>, persister: Persister<C>) -> Self {
        Self {
            scraper,
            persister,
            ready_attempts: 6,
        }
    }

    pub fn with_ready_attempts(mut self, ready_attempts: usize) -> Self {
        self.ready_attempts = ready_attempts;
        self
    }

    /// Wait for the database, then crawl the fixed list once.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&self) -> RunSummary {
        if let Err(e) = wait_for_datastore(self.persister.connector(), self.ready_attempts).await {
            error!(error = %e, "Datastore never became ready; crawling anyway");
        }

        let urls = get_crawl_list();
        info!(count = urls.len(), "Loaded crawl list");
        self.crawl_urls(&urls).await
    }

    /// Crawl and save each URL sequentially.
    pub async fn crawl_urls(&self, urls: &[String]) -> RunSummary {
        let mut summary = RunSummary {
            total: urls.len(),
            ..RunSummary::default()
        };

        for url in urls {
            let article = match self.scraper.crawl(url).await {
                Ok(article) => article,
                Err(e) => {
                    debug!(%url, error = %e, "Skipping URL");
                    summary.crawl_failed += 1;
                    continue;
                }
            };

            match self.persister.save(Some(&article)).await {
                Ok(()) => summary.saved += 1,
                Err(_) => summary.save_failed += 1,
            }
        }

        info!(
            total = summary.total,
            saved = summary.saved,
            crawl_failed = summary.crawl_failed,
            save_failed = summary.save_failed,
            "Crawl finished"
        );
        summary
    }
}
