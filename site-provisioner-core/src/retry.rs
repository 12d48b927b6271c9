//! Backoff Retrier
//!
//! Retries a fallible async operation with exponential backoff. The retrier does not classify
//! errors itself: callers wrap only the calls they consider safe to repeat, and may pass a
//! predicate to [`retry_with_backoff_when`] to stop at errors a retry cannot fix.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{CoreError, CoreResult};

/// Retry budget and backoff bounds.
///
/// The delay after the k-th failure (1-indexed) is `min(initial_delay * 2^(k-1), max_delay)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Total number of calls, including the first one. Must be at least 1.
    pub max_attempts: u32,
    #[serde(rename = "initialDelayMs", with = "crate::utils::duration_ms")]
    pub initial_delay: Duration,
    #[serde(rename = "maxDelayMs", with = "crate::utils::duration_ms")]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
        }
    }

    /// Delay awaited after the `failure`-th failed attempt (1-indexed).
    #[must_use]
    pub fn delay_for(&self, failure: u32) -> Duration {
        let exponent = failure.saturating_sub(1);
        2u32.checked_pow(exponent)
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.max_attempts == 0 {
            return Err(CoreError::InvalidRetryPolicy(
                "maxAttempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why [`retry_with_backoff`] gave up.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The policy allows no attempt; the operation was never called.
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),

    /// Every allowed attempt failed, or an attempt failed with an error that is not retried.
    /// `last_error` is the error of the final attempt.
    #[error("gave up after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: E },
}

impl<E: Into<CoreError>> From<RetryError<E>> for CoreError {
    fn from(e: RetryError<E>) -> Self {
        match e {
            RetryError::InvalidPolicy(reason) => CoreError::InvalidRetryPolicy(reason),
            RetryError::Exhausted { last_error, .. } => last_error.into(),
        }
    }
}

/// Calls `operation` until it succeeds or `policy.max_attempts` calls have failed.
///
/// Before each retry, `on_retry(attempt, &error, delay)` is invoked with the number of the
/// attempt that just failed, and the delay is awaited with `tokio::time::sleep`. Each retry
/// is also logged at `warn`.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    operation: F,
    on_retry: R,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    R: FnMut(u32, &E, Duration),
{
    retry_with_backoff_when(policy, operation, |_| true, on_retry).await
}

/// [`retry_with_backoff`] that gives up at the first error `retryable` rejects.
pub async fn retry_with_backoff_when<T, E, F, Fut, P, R>(
    policy: &RetryPolicy,
    mut operation: F,
    retryable: P,
    mut on_retry: R,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
    R: FnMut(u32, &E, Duration),
{
    if policy.max_attempts == 0 {
        return Err(RetryError::InvalidPolicy(
            "maxAttempts must be at least 1".to_string(),
        ));
    }

    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt >= policy.max_attempts || !retryable(&error) => {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }
            Err(error) => {
                let delay = policy.delay_for(attempt);
                log::warn!(
                    "Attempt {attempt}/{} failed: {error}; retrying in {}ms",
                    policy.max_attempts,
                    delay.as_millis()
                );
                on_retry(attempt, &error, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
