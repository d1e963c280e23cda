//! Command-line interface definitions for the Wikipedia crawler.
//!
//! Every option is optional and backed by an environment variable, so running
//! the binary with no arguments crawls the full list against the default
//! MariaDB settings.

use crate::storage::{DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_USER};
use clap::Parser;

/// Command-line arguments for the crawler.
///
/// # Examples
///
/// ```sh
/// # Defaults, or whatever MARIADB_* is set in the environment
/// wiki_crawler
///
/// # Point at a local database
/// wiki_crawler --db-host 127.0.0.1 --db-name crawler_test
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// MariaDB user
    #[arg(long, env = "MARIADB_USER", default_value = DEFAULT_DB_USER)]
    pub db_user: String,

    /// MariaDB password
    #[arg(
        long,
        env = "MARIADB_PASSWORD",
        default_value = DEFAULT_DB_PASSWORD,
        hide_env_values = true
    )]
    pub db_password: String,

    /// MariaDB host
    #[arg(long, env = "MARIADB_HOST", default_value = DEFAULT_DB_HOST)]
    pub db_host: String,

    /// MariaDB database name
    #[arg(long, env = "MARIADB_DATABASE", default_value = DEFAULT_DB_NAME)]
    pub db_name: String,

    /// Whole-request timeout for each page fetch, in seconds
    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// How many times to probe the database before crawling anyway
    #[arg(long, default_value_t = 6)]
    pub ready_attempts: usize,
}
