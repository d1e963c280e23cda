//! Test doubles for the fetcher, the database and the log sink.
//!
//! The stubs implement the same traits as the real HTTP and MariaDB types and
//! record every call so tests can assert on counts and order.

use crate::error::FetchError;
use crate::models::ArticleRow;
use crate::scrapers::PageFetcher;
use crate::storage::{ArticleConnection, Connector};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// Serves canned bodies per URL. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pages: HashMap<String, Result<String, u16>>,
}

impl StubFetcher {
    pub fn serving(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }
}

impl PageFetcher for StubFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status(*status)),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Everything the stub database saw.
#[derive(Debug, Default)]
pub struct DbLog {
    pub connects: usize,
    pub failed_connects: usize,
    /// `(title, summary, image_url)` per insert attempt.
    pub inserts: Vec<(String, String, String)>,
    pub closes: usize,
}

/// Connector whose connections record into a shared [`DbLog`].
#[derive(Debug, Clone, Default)]
pub struct StubConnector {
    pub log: Arc<Mutex<DbLog>>,
    /// Fail this many connects before succeeding.
    pub refuse_connects: usize,
    pub fail_inserts: bool,
}

impl StubConnector {
    pub fn refusing(refuse_connects: usize) -> Self {
        Self {
            refuse_connects,
            ..Self::default()
        }
    }

    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn connects(&self) -> usize {
        self.log.lock().unwrap().connects
    }

    pub fn closes(&self) -> usize {
        self.log.lock().unwrap().closes
    }

    pub fn inserts(&self) -> Vec<(String, String, String)> {
        self.log.lock().unwrap().inserts.clone()
    }
}

impl Connector for StubConnector {
    type Conn = StubConnection;

    async fn connect(&self) -> Result<StubConnection, sqlx::Error> {
        let mut log = self.log.lock().unwrap();
        if log.failed_connects < self.refuse_connects {
            log.failed_connects += 1;
            return Err(sqlx::Error::Protocol("connection refused".into()));
        }
        log.connects += 1;
        Ok(StubConnection {
            log: Arc::clone(&self.log),
            fail_inserts: self.fail_inserts,
        })
    }
}

#[derive(Debug)]
pub struct StubConnection {
    log: Arc<Mutex<DbLog>>,
    fail_inserts: bool,
}

impl ArticleConnection for StubConnection {
    async fn insert_article(&mut self, row: &ArticleRow<'_>) -> Result<(), sqlx::Error> {
        self.log.lock().unwrap().inserts.push((
            row.title.to_string(),
            row.summary.to_string(),
            row.image_url.clone(),
        ));
        if self.fail_inserts {
            return Err(sqlx::Error::Protocol("Table 'wiki_articles' doesn't exist".into()));
        }
        Ok(())
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

/// In-memory sink for formatted log lines.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// A plain-text subscriber writing into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let capture = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
