//! Waiting for the database to accept connections before crawling.
//!
//! # Architecture
//!
//! - [`Probe`]: one readiness check
//! - [`ConnectProbe`]: opens and closes a connection through a [`Connector`]
//! - [`RetryProbe`]: decorator that repeats any [`Probe`] with backoff
//!
//! # Retry Strategy
//!
//! The delay before attempt `n + 1` is
//!
//! ```text
//! delay = min(base_delay * 2^(n-1), max_delay) + random_jitter(0..=max_jitter)
//! ```
//!
//! Probing is sequential; nothing else runs while we wait.

use crate::error::ReadinessError;
use crate::storage::{ArticleConnection, Connector};
use rand::{Rng, rng};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

const READY_BASE_DELAY: Duration = Duration::from_secs(1);
const READY_MAX_DELAY: Duration = Duration::from_secs(10);
const READY_MAX_JITTER: Duration = Duration::from_millis(250);

/// A single readiness check.
pub trait Probe {
    async fn probe(&self) -> Result<(), sqlx::Error>;
}

/// Checks readiness by opening a connection and closing it again.
#[derive(Debug)]
pub struct ConnectProbe<'a, C> {
    pub connector: &'a C,
}

impl<C: Connector> Probe for ConnectProbe<'_, C> {
    async fn probe(&self) -> Result<(), sqlx::Error> {
        let conn = self.connector.connect().await?;
        if let Err(e) = conn.close().await {
            debug!(error = %e, "Readiness probe connection did not close cleanly");
        }
        Ok(())
    }
}

/// Repeats a [`Probe`] with exponential backoff until it passes or
/// `max_attempts` is reached.
pub struct RetryProbe<T> {
    inner: T,
    max_attempts: usize,
    base_delay: Duration,
    max_delay: Duration,
    max_jitter: Duration,
}

impl<T: Probe> RetryProbe<T> {
    /// Wrap `inner`, doubling from `base_delay` up to 30 seconds, no jitter.
    pub fn new(inner: T, max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: Duration::from_secs(30),
            max_jitter: Duration::ZERO,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    fn delay_after(&self, attempt: usize) -> Duration {
        let shift = (attempt - 1).min(31) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms = rng().random_range(0..=self.max_jitter.as_millis() as u64);
        delay + Duration::from_millis(jitter_ms)
    }

    /// Probe until success. Returns the number of attempts used.
    #[instrument(level = "info", skip_all)]
    pub async fn wait(&self) -> Result<usize, ReadinessError> {
        let t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            match self.inner.probe().await {
                Ok(()) => return Ok(attempt),
                Err(e) if attempt >= self.max_attempts => {
                    error!(
                        attempt,
                        max = self.max_attempts,
                        elapsed_ms_total = t0.elapsed().as_millis() as u64,
                        error = %e,
                        "Readiness probe exhausted attempts"
                    );
                    return Err(ReadinessError {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        attempt,
                        max = self.max_attempts,
                        ?delay,
                        error = %e,
                        "Datastore not ready; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

impl<T> fmt::Debug for RetryProbe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryProbe")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("max_jitter", &self.max_jitter)
            .finish()
    }
}

/// Block until `connector` can open a connection, retrying up to
/// `max_attempts` times: 1s doubling to 10s, plus up to 250ms jitter.
#[instrument(level = "info", skip(connector))]
pub async fn wait_for_datastore<C: Connector>(
    connector: &C,
    max_attempts: usize,
) -> Result<usize, ReadinessError> {
    let t0 = Instant::now();
    let probe = RetryProbe::new(ConnectProbe { connector }, max_attempts, READY_BASE_DELAY)
        .with_max_delay(READY_MAX_DELAY)
        .with_max_jitter(READY_MAX_JITTER);
    let attempts = probe.wait().await?;
    info!(
        attempts,
        elapsed_ms_total = t0.elapsed().as_millis() as u64,
        "Datastore is ready"
    );
    Ok(attempts)
}
