use crate::config::RetryConfig;
use crate::error::SourceError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Delay schedule between fetch attempts: `base * 2^n` plus up to `base` of jitter
#[derive(Debug)]
pub struct Backoff {
    base_ms: u64,
    next_ms: u64,
}

impl Backoff {
    pub fn new(base_ms: u64) -> Self {
        Self {
            base_ms,
            next_ms: base_ms,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let jitter = match self.base_ms {
            0 => 0,
            base => rand::random::<u64>() % base,
        };
        let delay = Duration::from_millis(self.next_ms.saturating_add(jitter));
        self.next_ms = self.next_ms.saturating_mul(2);
        delay
    }
}

/// Run a fetch until it succeeds, fails permanently, or runs out of attempts.
///
/// Only errors that [`SourceError::is_transient`] accepts are retried; a missing
/// file or a command that cannot be executed is returned immediately.
pub async fn fetch_with_retry<F, Fut>(
    config: &RetryConfig,
    mut fetch: F,
) -> Result<String, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, SourceError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut backoff = Backoff::new(config.backoff_base_ms);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match fetch().await {
            Ok(body) => return Ok(body),
            Err(e) => e,
        };

        if !err.is_transient() {
            debug!("Fetch failed permanently: {}", err);
            return Err(err);
        }
        if attempt >= max_attempts {
            warn!("Fetch failed after {} attempts: {}", attempt, err);
            return Err(err);
        }

        let delay = backoff.next_delay();
        warn!(
            "Fetch attempt {} failed: {}. Retrying in {:?}",
            attempt, err, delay
        );
        sleep(delay).await;
    }
}
