//! Client configuration: backend base URL and retry policy.
//!
//! The base URL is the one externally-supplied piece of configuration the
//! client needs. For web builds it is baked in at compile time from the
//! `EARTHLYN_BACKEND_URL` environment variable, falling back to the local
//! development backend.

use std::time::Duration;

/// Default backend when `EARTHLYN_BACKEND_URL` is not set at build time.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Bounded retry with exponential backoff for transient failures.
///
/// Only network errors and 5xx responses are retried; 4xx responses are
/// final. `max_retries = 0` (the default) disables retrying entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first, 0 to disable.
    pub max_retries: u32,
    /// Base delay before the first retry; doubles per attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Configuration for [`crate::ApiClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://api.earthlyn.example`.
    pub base_url: String,
    pub retry: RetryPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("EARTHLYN_BACKEND_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at the given backend, with default retry.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Builder method to set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let retry = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(retry.delay_for(0), Duration::from_millis(100));
        assert_eq!(retry.delay_for(1), Duration::from_millis(200));
        assert_eq!(retry.delay_for(2), Duration::from_millis(400));
    }
}
