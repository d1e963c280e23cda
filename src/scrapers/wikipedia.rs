//! Wikipedia article scraper.
//!
//! Pulls three things out of a rendered article page:
//!
//! - the title from `h1#firstHeading`
//! - the lead section: paragraphs inside `div.mw-parser-output` that come
//!   before the first `h2`
//! - the first image of the first `table.infobox`

use crate::error::CrawlError;
use crate::models::{ArticleRecord, UNKNOWN_TITLE};
use crate::scrapers::PageFetcher;
use crate::utils::normalize_text;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, instrument, warn};
use url::Url;

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1#firstHeading").unwrap());
static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mw-parser-output").unwrap());
static INFOBOX_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table.infobox").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Fetches Wikipedia pages and extracts [`ArticleRecord`]s.
#[derive(Debug)]
pub struct WikiScraper<F> {
    fetcher: F,
}

impl<F: PageFetcher> WikiScraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and extract its article.
    ///
    /// A fetch failure is logged and returned; there is no retry.
    #[instrument(level = "info", skip(self))]
    pub async fn crawl(&self, url: &str) -> Result<ArticleRecord, CrawlError> {
        let body = match self.fetcher.fetch_page(url).await {
            Ok(body) => body,
            Err(source) => {
                error!(%url, error = %source, "Failed to fetch URL");
                return Err(CrawlError::Fetch {
                    url: url.to_string(),
                    source,
                });
            }
        };

        let article = extract_article(url, &body)?;
        info!(%url, title = %article.title, "Crawled data");
        Ok(article)
    }
}

/// Extract an [`ArticleRecord`] from a page's HTML.
///
/// A missing title falls back to [`UNKNOWN_TITLE`] and a missing infobox gives
/// no image. A missing content container is an error.
pub fn extract_article(url: &str, html: &str) -> Result<ArticleRecord, CrawlError> {
    let document = Html::parse_document(html);

    let title = match document.select(&TITLE_SELECTOR).next() {
        Some(heading) => normalize_text(heading.text()),
        None => {
            warn!(%url, "Title not found");
            UNKNOWN_TITLE.to_string()
        }
    };

    let Some(container) = document.select(&CONTENT_SELECTOR).next() else {
        error!(%url, "Main content container not found");
        return Err(CrawlError::MissingContent {
            url: url.to_string(),
        });
    };
    let summary = extract_summary(container);

    let images = document
        .select(&INFOBOX_SELECTOR)
        .next()
        .and_then(|infobox| infobox.select(&IMG_SELECTOR).next())
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .map(|src| resolve_image_src(url, src.trim()))
        .into_iter()
        .collect();

    Ok(ArticleRecord {
        title,
        summary,
        images,
    })
}

/// Paragraphs before the container's first `h2`, or every direct-child
/// paragraph when it has no `h2`.
fn extract_summary(container: ElementRef<'_>) -> String {
    let paragraphs = lead_paragraphs(container).unwrap_or_else(|| {
        container
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "p")
            .map(|p| normalize_text(p.text()))
            .filter(|text| !text.is_empty())
            .collect()
    });
    paragraphs.join("\n")
}

/// `None` when the container holds no `h2`.
fn lead_paragraphs(container: ElementRef<'_>) -> Option<Vec<String>> {
    let mut paragraphs = Vec::new();
    for el in container.descendants().filter_map(ElementRef::wrap) {
        match el.value().name() {
            "h2" => return Some(paragraphs),
            "p" => {
                let text = normalize_text(el.text());
                if !text.is_empty() {
                    paragraphs.push(text);
                }
            }
            _ => {}
        }
    }
    None
}

/// Make an `img` source absolute.
///
/// Protocol-relative sources (`//host/path`) get `https:`; relative ones are
/// resolved against the page URL.
pub fn resolve_image_src(page_url: &str, src: &str) -> String {
    if src.starts_with("//") {
        return format!("https:{src}");
    }
    match Url::parse(page_url).and_then(|base| base.join(src)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => src.to_string(),
    }
}
