//! MariaDB driver for the storage traits, over `sqlx`'s MySQL connection.

use super::{ArticleConnection, Connector, DbConfig};
use crate::models::ArticleRow;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};

const INSERT_ARTICLE: &str =
    "INSERT INTO wiki_articles (title, summary, image_url) VALUES (?, ?, ?)";

/// Opens one `MySqlConnection` per call.
#[derive(Debug, Clone)]
pub struct MariaDbConnector {
    options: MySqlConnectOptions,
}

impl MariaDbConnector {
    pub fn new(config: &DbConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);
        Self { options }
    }
}

impl Connector for MariaDbConnector {
    type Conn = MySqlConnection;

    async fn connect(&self) -> Result<MySqlConnection, sqlx::Error> {
        self.options.connect().await
    }
}

impl ArticleConnection for MySqlConnection {
    async fn insert_article(&mut self, row: &ArticleRow<'_>) -> Result<(), sqlx::Error> {
        // An uncommitted transaction rolls back when dropped.
        let mut tx = self.begin().await?;
        sqlx::query(INSERT_ARTICLE)
            .bind(row.title)
            .bind(row.summary)
            .bind(&row.image_url)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        Connection::close(self).await
    }
}
