//! Retry and batching for item-detail loading.
//!
//! Sleeping is injected so the app can use browser timers and tests can
//! record delays without waiting.

use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{BatchSettings, RetrySettings};

/// Upper bound on any single backoff delay
pub const MAX_DELAY: Duration = Duration::from_secs(60);
use crate::error::ApiError;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first failure
    pub initial_delay: Duration,
    /// Factor to multiply delay by after each failure
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3, initial_delay: Duration::from_secs(1), backoff_factor: 2.0 }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay before attempt `attempt + 1`, where `attempt` counts from 1.
    ///
    /// Capped at [`MAX_DELAY`]; a negative or non-finite factor also yields the cap.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
        Duration::try_from_secs_f64(secs).map_or(MAX_DELAY, |delay| delay.min(MAX_DELAY))
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            backoff_factor: settings.backoff_factor,
        }
    }
}

/// Batch size and the pause between batches
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub size: usize,
    pub pause: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { size: 3, pause: Duration::from_millis(500) }
    }
}

impl From<&BatchSettings> for BatchConfig {
    fn from(settings: &BatchSettings) -> Self {
        Self { size: settings.size.max(1), pause: Duration::from_millis(settings.pause_ms) }
    }
}

/// Retry policy for determining if an error is retryable
pub trait RetryPolicy<E> {
    fn is_retryable(&self, error: &E) -> bool;
}

/// Retries everything except "not found" responses
pub struct SkipNotFound;

impl RetryPolicy<ApiError> for SkipNotFound {
    fn is_retryable(&self, error: &ApiError) -> bool {
        !error.is_not_found()
    }
}

/// Run `operation` until it succeeds, the policy refuses, or attempts run out.
///
/// No sleep happens after the last attempt.
pub async fn with_retry<T, E, F, Fut, S, SFut>(
    config: &RetryConfig,
    policy: &impl RetryPolicy<E>,
    mut operation: F,
    sleep: &S,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(event = "retry.recovered", attempt);
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= config.max_attempts || !policy.is_retryable(&error) {
                    warn!(event = "retry.gave_up", attempt, error = %error);
                    return Err(error);
                }

                let delay = config.delay_after(attempt);
                warn!(event = "retry.attempt_failed", attempt, delay_ms = delay.as_millis() as u64, error = %error);
                sleep(delay).await;
            }
        }
    }
}

/// Load `keys` in fixed-size batches: each batch runs concurrently, batches
/// run one after another with a pause in between. Results keep input order.
pub async fn load_in_batches<K, T, F, Fut, S, SFut>(keys: &[K], config: &BatchConfig, load: F, sleep: &S) -> Vec<T>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = T>,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut results = Vec::with_capacity(keys.len());
    let batch_count = keys.chunks(config.size.max(1)).len();

    for (index, batch) in keys.chunks(config.size.max(1)).enumerate() {
        results.extend(join_all(batch.iter().cloned().map(&load)).await);
        if index + 1 < batch_count {
            sleep(config.pause).await;
        }
    }

    results
}

/// Batched loading where every key gets its own retry loop
pub async fn load_all_with_retry<K, T, E, F, Fut, S, SFut>(
    keys: &[K],
    retry: &RetryConfig,
    batch: &BatchConfig,
    policy: &impl RetryPolicy<E>,
    fetch: F,
    sleep: &S,
) -> Vec<Result<T, E>>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let fetch = &fetch;
    load_in_batches(keys, batch, |key: K| with_retry(retry, policy, move || fetch(key.clone()), sleep), sleep).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::future::ready;

    #[derive(Default)]
    struct Sleeps(RefCell<Vec<Duration>>);

    impl Sleeps {
        fn sleeper(&self) -> impl Fn(Duration) -> std::future::Ready<()> + '_ {
            move |d| {
                self.0.borrow_mut().push(d);
                ready(())
            }
        }

        fn recorded(&self) -> Vec<Duration> {
            self.0.borrow().clone()
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_backoff_schedule() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_after(1), secs(1));
        assert_eq!(config.delay_after(2), secs(2));
        assert_eq!(config.delay_after(3), secs(4));
    }

    #[test]
    fn test_backoff_is_capped_for_long_schedules() {
        let config = RetryConfig::default().with_max_attempts(100);
        assert_eq!(config.delay_after(7), secs(60));
        assert_eq!(config.delay_after(99), MAX_DELAY);
        assert_eq!(config.delay_after(u32::MAX), MAX_DELAY);
    }

    #[test]
    fn test_bad_backoff_factor_does_not_panic() {
        for factor in [-2.0, f64::NAN, f64::INFINITY] {
            let config = RetryConfig { backoff_factor: factor, ..RetryConfig::default() };
            assert_eq!(config.delay_after(1), secs(1));
            assert!(config.delay_after(2) <= MAX_DELAY);
            assert!(config.delay_after(3) <= MAX_DELAY);
        }
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt_without_trailing_sleep() {
        let sleeps = Sleeps::default();
        let calls = Cell::new(0);
        let result = with_retry(
            &RetryConfig::default().with_max_attempts(3),
            &SkipNotFound,
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                ready(if n < 3 { Err(ApiError::Network("reset".into())) } else { Ok("details") })
            },
            &sleeps.sleeper(),
        )
        .await;

        assert_eq!(result, Ok("details"));
        assert_eq!(calls.get(), 3);
        assert_eq!(sleeps.recorded(), vec![secs(1), secs(2)]);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_do_not_sleep_after_last() {
        let sleeps = Sleeps::default();
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = with_retry(
            &RetryConfig::default(),
            &SkipNotFound,
            || {
                calls.set(calls.get() + 1);
                ready(Err(ApiError::Status { status: 503, message: "busy".into() }))
            },
            &sleeps.sleeper(),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
        assert_eq!(sleeps.recorded(), vec![secs(1), secs(2)]);
    }

    #[tokio::test]
    async fn test_not_found_is_never_retried() {
        let sleeps = Sleeps::default();
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = with_retry(
            &RetryConfig::default().with_max_attempts(10),
            &SkipNotFound,
            || {
                calls.set(calls.get() + 1);
                ready(Err(ApiError::Status { status: 400, message: "Item not found".into() }))
            },
            &sleeps.sleeper(),
        )
        .await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(calls.get(), 1);
        assert!(sleeps.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_batches_pause_between_but_not_after() {
        let sleeps = Sleeps::default();
        let keys: Vec<u32> = (1..=7).collect();
        let results = load_in_batches(&keys, &BatchConfig::default(), |k| ready(k * 10), &sleeps.sleeper()).await;

        assert_eq!(results, vec![10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(sleeps.recorded(), vec![Duration::from_millis(500); 2]);
    }

    #[tokio::test]
    async fn test_single_batch_never_pauses() {
        let sleeps = Sleeps::default();
        let results = load_in_batches(&[1u32, 2], &BatchConfig::default(), |k| ready(k), &sleeps.sleeper()).await;
        assert_eq!(results, vec![1, 2]);
        assert!(sleeps.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_load_all_with_retry_keeps_order_and_errors() {
        let sleeps = Sleeps::default();
        let attempts = RefCell::new(std::collections::HashMap::<&str, u32>::new());
        let keys = ["a", "missing", "flaky", "d"];

        let results = load_all_with_retry(
            &keys,
            &RetryConfig::default(),
            &BatchConfig::default(),
            &SkipNotFound,
            |key: &'static str| {
                let n = {
                    let mut map = attempts.borrow_mut();
                    let n = map.entry(key).or_insert(0);
                    *n += 1;
                    *n
                };
                ready(match key {
                    "missing" => Err(ApiError::NotFound(key.to_string())),
                    "flaky" if n == 1 => Err(ApiError::Network("dropped".into())),
                    _ => Ok(key.to_uppercase()),
                })
            },
            &sleeps.sleeper(),
        )
        .await;

        assert_eq!(results[0], Ok("A".to_string()));
        assert!(results[1].as_ref().unwrap_err().is_not_found());
        assert_eq!(results[2], Ok("FLAKY".to_string()));
        assert_eq!(results[3], Ok("D".to_string()));
        assert_eq!(attempts.borrow()["missing"], 1);
        assert_eq!(attempts.borrow()["flaky"], 2);
        // one backoff for "flaky", one pause between the two batches
        assert_eq!(sleeps.recorded(), vec![secs(1), Duration::from_millis(500)]);
    }
}
