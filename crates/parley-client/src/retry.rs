//! Bounded retry with backoff around a single exchange

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Error, Result},
    exchange::Exchange,
    types::{ChatRequest, Reply},
};

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// `base * i`
    #[default]
    Linear,
    /// `base * 2^(i-1)`
    Exponential,
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay unit in milliseconds
    pub base_delay_ms: u64,
    /// Upper bound for any single delay in milliseconds
    pub max_delay_ms: u64,
    /// Growth schedule
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff: Backoff::Linear,
        }
    }
}

impl RetryPolicy {
    /// Delay inserted before retry `retry` (1-based: the first retry is 1)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let retry = retry.max(1);
        let millis = match self.backoff {
            Backoff::Linear => self.base_delay_ms.saturating_mul(retry as u64),
            Backoff::Exponential => {
                let factor = 1u64.checked_shl(retry - 1).unwrap_or(u64::MAX);
                self.base_delay_ms.saturating_mul(factor)
            }
        };
        Duration::from_millis(millis.min(self.max_delay_ms))
    }

    /// Reject policies that could never attempt an exchange
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Wraps an [`Exchange`] with the retry policy.
///
/// Knows nothing about conversations: it sends a request and hands back the
/// decoded reply or the last transport error.
#[derive(Clone)]
pub struct RetryingClient {
    exchange: Arc<dyn Exchange>,
    endpoint: String,
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl RetryingClient {
    pub fn new(exchange: Arc<dyn Exchange>, endpoint: impl Into<String>) -> Self {
        Self {
            exchange,
            endpoint: endpoint.into(),
            policy: RetryPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Set retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Token that aborts pending backoff delays when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Exchange with the configured endpoint
    pub async fn execute(&self, request: &ChatRequest) -> Result<Reply> {
        self.execute_at(&self.endpoint, request).await
    }

    /// Exchange with an explicit endpoint
    pub async fn execute_at(&self, endpoint: &str, request: &ChatRequest) -> Result<Reply> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1u32;

        loop {
            if self.cancel.is_cancelled() {
                return Err(Error::Aborted);
            }

            let error = match self.exchange.exchange(endpoint, request).await {
                Ok(reply) => return Ok(reply),
                Err(e) => e,
            };

            if !error.is_retryable() || attempt >= max_attempts {
                if error.is_retryable() {
                    tracing::error!(
                        "Exchange failed after {} attempts: {}",
                        attempt,
                        error
                    );
                }
                return Err(error);
            }

            let delay = self.policy.delay_for_retry(attempt);
            tracing::warn!(
                "Exchange failed (attempt {}/{}): {}. Retrying in {:?}...",
                attempt,
                max_attempts,
                error,
                delay
            );

            tokio::select! {
                _ = self.cancel.cancelled() => return Err(Error::Aborted),
                _ = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }
}
