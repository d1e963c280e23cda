//! Data models shared by the scraper, the storage layer and the pipeline.
//!
//! - [`ArticleRecord`]: what the extractor pulls out of one Wikipedia page
//! - [`ArticleRow`]: the same record shaped for the `wiki_articles` table
//! - [`RunSummary`]: per-run counters logged when the crawl finishes

/// Title used when a page has no `h1#firstHeading`.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One extracted Wikipedia article.
///
/// Lives for a single loop iteration: built by the scraper, consumed by the
/// persister, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// The page heading, or [`UNKNOWN_TITLE`].
    pub title: String,
    /// Lead paragraphs, newline-joined. May be empty.
    pub summary: String,
    /// The infobox image URL, if any. Never more than one entry.
    pub images: Vec<String>,
}

impl ArticleRecord {
    /// The `image_url` column value: images joined by newlines.
    pub fn image_url(&self) -> String {
        self.images.join("\n")
    }
}

/// Column values for one `wiki_articles` insert.
#[derive(Debug, PartialEq, Eq)]
pub struct ArticleRow<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub image_url: String,
}

impl<'a> From<&'a ArticleRecord> for ArticleRow<'a> {
    fn from(record: &'a ArticleRecord) -> Self {
        Self {
            title: &record.title,
            summary: &record.summary,
            image_url: record.image_url(),
        }
    }
}

/// Counters for one pass over the crawl list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub crawl_failed: usize,
    pub saved: usize,
    pub save_failed: usize,
}
