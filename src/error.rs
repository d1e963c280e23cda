//! Error types for each pipeline stage.
//!
//! Every stage returns its own error so the pipeline can log the failure and
//! move on to the next URL.

use thiserror::Error;

/// Failure to download a page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Failure to turn a URL into an [`ArticleRecord`](crate::models::ArticleRecord).
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("failed to fetch URL {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("no main content container in {url}")]
    MissingContent { url: String },
}

/// Failure to store a record.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("no article data to save")]
    NoArticle,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The datastore never answered within the allowed attempts.
#[derive(Error, Debug)]
#[error("datastore not ready after {attempts} attempts: {source}")]
pub struct ReadinessError {
    pub attempts: usize,
    #[source]
    pub source: sqlx::Error,
}
