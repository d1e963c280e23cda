//! Persistence of extracted articles into the `wiki_articles` table.
//!
//! # Connection model
//!
//! Each [`Persister::save`] opens its own connection, inserts one row,
//! commits and closes. There is no pool and no statement reuse. The table is
//! provisioned outside this program:
//!
//! ```sql
//! CREATE TABLE wiki_articles (title TEXT, summary TEXT, image_url TEXT);
//! ```
//!
//! Database access sits behind [`Connector`] / [`ArticleConnection`] so the
//! MariaDB driver in [`mariadb`] can be swapped for a recording stub in tests.

use crate::cli::Cli;
use crate::error::PersistError;
use crate::models::{ArticleRecord, ArticleRow};
use crate::utils::truncate_for_log;
use tracing::{error, info, instrument, warn};

pub mod mariadb;

/// MariaDB's port. Not configurable.
pub const DB_PORT: u16 = 3306;

pub const DEFAULT_DB_USER: &str = "crawler";
pub const DEFAULT_DB_PASSWORD: &str = "a-insights";
pub const DEFAULT_DB_HOST: &str = "mariadb";
pub const DEFAULT_DB_NAME: &str = "crawler_dev";

/// Connection parameters for the article database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DB_PORT,
            database: DEFAULT_DB_NAME.to_string(),
        }
    }
}

impl From<&Cli> for DbConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            user: cli.db_user.clone(),
            password: cli.db_password.clone(),
            host: cli.db_host.clone(),
            port: DB_PORT,
            database: cli.db_name.clone(),
        }
    }
}

/// Opens fresh database connections.
pub trait Connector {
    type Conn: ArticleConnection;

    async fn connect(&self) -> Result<Self::Conn, sqlx::Error>;
}

/// One open database connection.
pub trait ArticleConnection {
    /// Insert `row` into `wiki_articles` and commit.
    async fn insert_article(&mut self, row: &ArticleRow<'_>) -> Result<(), sqlx::Error>;

    /// Close the connection. Consumes it, so it can only happen once.
    async fn close(self) -> Result<(), sqlx::Error>;
}

/// Saves [`ArticleRecord`]s, one connection per record.
#[derive(Debug)]
pub struct Persister<C> {
    connector: C,
}

impl<C: Connector> Persister<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Insert one article.
    ///
    /// `None` is logged and rejected without touching the database. Database
    /// errors are logged and returned; the connection is closed whenever it
    /// was opened.
    #[instrument(level = "info", skip_all)]
    pub async fn save(&self, article: Option<&ArticleRecord>) -> Result<(), PersistError> {
        let Some(article) = article else {
            error!("No article data to save");
            return Err(PersistError::NoArticle);
        };
        let row = ArticleRow::from(article);

        let mut conn = match self.connector.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                error!(error = %e, "Database error while connecting");
                return Err(e.into());
            }
        };

        let inserted = conn.insert_article(&row).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection");
        }

        match inserted {
            Ok(()) => {
                info!(
                    title = %truncate_for_log(row.title, 120),
                    "Saved article to the database"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Database error while inserting article");
                Err(e.into())
            }
        }
    }
}
