//! Retry logic with exponential backoff for transient failures.
//!
//! Chat-completion endpoints throttle and time out regularly. Failed calls
//! that look transient are retried with increasing delays; anything else
//! fails on the first attempt.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first call.
    pub max_retries: u32,
    /// Base delay between retries (exponentially increased).
    #[serde(with = "crate::serde_millis")]
    pub base_delay: Duration,
    /// Maximum delay between retries.
    #[serde(with = "crate::serde_millis")]
    pub max_delay: Duration,
    /// Whether to add random jitter to delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Result of a retried operation.
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The final result: the first success or the last error.
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries needed).
    pub attempts: u32,
    /// Total duration spent on all attempts, delays included.
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Execute an async operation with retry logic.
///
/// `operation` receives the zero-based attempt number. An error for which
/// `is_retryable` returns `false` ends the loop immediately.
///
/// ```ignore
/// let outcome = execute_with_retry(&RetryConfig::default(), |attempt| async move {
///     call_upstream(attempt).await
/// }, |err| err.is_retryable()).await;
/// ```
pub async fn execute_with_retry<T, E, F, Fut, R>(
    config: &RetryConfig,
    mut operation: F,
    is_retryable: R,
) -> RetryResult<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let start = Instant::now();
    let mut attempt = 0;

    loop {
        let result = operation(attempt).await;
        let give_up = match &result {
            Ok(_) => true,
            Err(err) => attempt >= config.max_retries || !is_retryable(err),
        };

        if give_up {
            return RetryResult {
                result,
                attempts: attempt + 1,
                total_duration: start.elapsed(),
            };
        }

        tokio::time::sleep(calculate_delay(config, attempt)).await;
        attempt += 1;
    }
}

/// Calculate delay for a retry attempt with exponential backoff.
fn calculate_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let base = config.base_delay.as_millis() as u64;
    let exponential = base.saturating_mul(2_u64.saturating_pow(attempt));
    let delay = exponential.min(config.max_delay.as_millis() as u64);

    if config.jitter {
        // 0-50% on top of the backoff
        let jitter = fastrand::u64(0..=delay / 2);
        Duration::from_millis(delay + jitter)
    } else {
        Duration::from_millis(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig::default()
            .with_max_retries(max_retries)
            .with_base_delay(Duration::from_millis(1))
            .with_jitter(false)
    }

    #[tokio::test]
    async fn retry_succeeds_eventually() {
        let mut calls = 0;
        let outcome = execute_with_retry(
            &fast_config(3),
            |_attempt| {
                calls += 1;
                let current = calls;
                async move {
                    if current < 3 {
                        Err("not yet")
                    } else {
                        Ok("success")
                    }
                }
            },
            |_| true,
        )
        .await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.into_result().unwrap(), "success");
    }

    #[tokio::test]
    async fn retry_fails_after_max_attempts() {
        let outcome: RetryResult<(), &str> =
            execute_with_retry(&fast_config(2), |_| async { Err("always fails") }, |_| true).await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.attempts, 3);
    }

    #[tokio::test]
    async fn non_retryable_error_stops_immediately() {
        let outcome: RetryResult<(), &str> =
            execute_with_retry(&fast_config(5), |_| async { Err("bad request") }, |_| false).await;

        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.into_result(), Err("bad request"));
    }

    #[test]
    fn delay_grows_and_caps() {
        let cfg = RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300))
            .with_jitter(false);

        assert_eq!(calculate_delay(&cfg, 0), Duration::from_millis(100));
        assert_eq!(calculate_delay(&cfg, 1), Duration::from_millis(200));
        assert_eq!(calculate_delay(&cfg, 2), Duration::from_millis(300));
        assert_eq!(calculate_delay(&cfg, 40), Duration::from_millis(300));
    }

    #[test]
    fn jitter_stays_within_half() {
        let cfg = RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_jitter(true);
        for _ in 0..32 {
            let delay = calculate_delay(&cfg, 0);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(150));
        }
    }
}
