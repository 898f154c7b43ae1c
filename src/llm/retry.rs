use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::errors::CoachResult;

/// Retry configuration with exponential backoff for calls to the text generator
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// Run `func` until it succeeds, fails with a non-retryable error,
    /// or `max_attempts` is reached
    pub async fn execute<F, Fut, T>(&self, mut func: F) -> CoachResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CoachResult<T>>,
    {
        let mut attempt = 0;
        let mut delay_ms = self.initial_delay_ms;

        loop {
            match func().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;

                    if !e.is_retryable() {
                        return Err(e);
                    }

                    if attempt >= self.max_attempts.max(1) {
                        tracing::warn!("Text generation failed after {} attempts", attempt);
                        return Err(e);
                    }

                    tracing::debug!(
                        "Attempt {} failed, retrying in {}ms: {}",
                        attempt,
                        delay_ms,
                        e
                    );

                    sleep(Duration::from_millis(delay_ms)).await;

                    delay_ms =
                        ((delay_ms as f64 * self.backoff_factor) as u64).min(self.max_delay_ms);
                }
            }
        }
    }
}
