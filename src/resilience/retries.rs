//! Retry logic for admin API calls.
//!
//! # Responsibilities
//! - Decide whether a failed call may be retried
//! - Run a call up to `max_attempts` times with backoff in between
//!
//! # Design Decisions
//! - Only read-only calls are retried; a mutation may have been applied
//!   even though its response was lost
//! - Transport failures, timeouts and 5xx statuses are retryable
//! - Error envelopes from the server are final

use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::Backoff;
use crate::rpc::RpcError;

/// Whether a failed call is worth another attempt.
pub fn is_retryable(err: &RpcError) -> bool {
    match err {
        RpcError::Transport(_) | RpcError::Timeout { .. } => true,
        RpcError::Status { status, .. } => *status >= 500,
        RpcError::InvalidUrl(_) | RpcError::Server { .. } | RpcError::Decode { .. } => false,
    }
}

/// How often and how patiently to retry read-only calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self::new(1, Backoff::new(0, 0))
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        if config.enabled {
            Self::new(config.max_attempts, Backoff::from_config(config))
        } else {
            Self::none()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `call` until it succeeds, fails permanently, or attempts run out.
    pub async fn run<T, F, Fut>(&self, method: &str, mut call: F) -> Result<T, RpcError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(v) => return Ok(v),
                Err(e) if is_retryable(&e) && attempt + 1 < self.max_attempts => {
                    attempt += 1;
                    let delay = self.backoff.delay(attempt);
                    tracing::warn!(
                        method,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying admin API call"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
