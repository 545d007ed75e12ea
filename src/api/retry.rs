// SPDX-License-Identifier: MPL-2.0
//! Retry with exponential backoff.
//!
//! Transport failures and 5xx answers are transient: the attempt is repeated
//! after `initial_delay`, then twice that, and so on. Anything else is handed
//! back to the caller on the first try. Dropping the returned future (the
//! user pressing "Stop") aborts the loop, including a pending sleep.

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// How often and how patiently a request is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: crate::config::DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(crate::config::DEFAULT_INITIAL_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after the first failure.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_config(server: &ServerConfig) -> Self {
        Self {
            max_retries: server.max_retries(),
            initial_delay: server.initial_backoff(),
        }
    }

    /// Delay before retry number `retry` (1-based): `initial_delay * 2^(retry-1)`.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(factor)
    }
}

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// the policy is exhausted. The last error is returned in the latter case.
pub async fn with_backoff<T, F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retry = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay_for(retry);
                tracing::warn!(%err, retry, delay_ms = delay.as_millis() as u64, "request failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Maps a 5xx answer to [`Error::Server`] so that [`with_backoff`] retries it.
pub(crate) fn reject_server_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_server_error() {
        Err(Error::Server {
            status: status.as_u16(),
        })
    } else {
        Ok(response)
    }
}
