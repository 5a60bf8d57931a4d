use crate::error::{BadgeServerError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Attempt budget and backoff schedule for GraphQL calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts including the first one (default: 3).
    pub max_attempts: u32,
    /// Delay before the second attempt in milliseconds (default: 1000).
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each failure (default: 2.0).
    pub backoff_factor: f64,
    /// Upper bound for a single delay in milliseconds (default: 4000).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            backoff_factor: 2.0,
            max_delay_ms: 4000,
        }
    }
}

impl RetryConfig {
    /// Delay slept after the given failed attempt (1-based).
    ///
    /// A factor below 1.0 is treated as 1.0 so delays never shrink.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.max(1.0);
        let exponent = attempt.saturating_sub(1) as i32;
        let delay_ms = (self.initial_delay_ms as f64 * factor.powi(exponent)) as u64;
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }
}

/// Runs `f` until it succeeds, fails fatally, or the attempt budget is spent.
///
/// Only errors for which [`BadgeServerError::is_transient`] holds are retried;
/// anything else is returned as-is after the attempt that produced it. When
/// every attempt fails transiently the last error is wrapped in
/// [`BadgeServerError::RetryExhausted`].
pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "{} succeeded after retrying", operation_name);
                }
                return Ok(result);
            }
            Err(error) if !error.is_transient() => {
                warn!(attempt, "{} failed permanently: {}", operation_name, error);
                return Err(error);
            }
            Err(error) => {
                if attempt >= max_attempts {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name, max_attempts, error
                    );
                    return Err(BadgeServerError::RetryExhausted {
                        attempts: max_attempts,
                        source: Box::new(error),
                    });
                }

                let delay = config.delay_after(attempt);
                warn!(
                    "{} failed on attempt {}/{}: {}. Retrying in {}ms...",
                    operation_name,
                    attempt,
                    max_attempts,
                    error,
                    delay.as_millis()
                );

                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
