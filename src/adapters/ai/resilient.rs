//! Resilient provider wrapper - retry with backoff and fixed fallback text.
//!
//! Wraps any `AiProvider` so callers always get a usable reply. Transient
//! failures are retried with doubling backoff; once attempts are exhausted,
//! or on the first non-retryable failure, a canned fallback reply is returned
//! instead of an error. Callers never observe a provider failure.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::domain::conversation::prompts;
use crate::ports::{AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Retry behavior for the resilient wrapper.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts before giving up (first try included).
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Builds the retry policy from the application config, keeping the
    /// standard 1s initial backoff.
    pub fn from_ai_config(ai: &crate::config::AiConfig) -> Self {
        Self {
            max_attempts: ai.max_retries,
            ..Self::default()
        }
    }

    /// Returns the delay before the retry following attempt `attempt` (1-based).
    fn backoff_for(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Wrapper that makes any provider infallible from the caller's view.
pub struct ResilientAiProvider<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P: AiProvider> ResilientAiProvider<P> {
    /// Wraps a provider with the default retry policy (3 attempts, 1s/2s backoff).
    pub fn new(inner: P) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    /// Wraps a provider with a custom retry policy.
    pub fn with_policy(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Picks fallback wording from the conversation tail.
    ///
    /// When the respondent spoke last, acknowledge and nudge the conversation
    /// forward; otherwise emit a neutral continuation line.
    fn fallback_for(request: &CompletionRequest) -> &'static str {
        if request.last_message_is_user() {
            prompts::FALLBACK_AFTER_RESPONDENT
        } else {
            prompts::FALLBACK_NEUTRAL
        }
    }

    fn fallback_response(&self, request: &CompletionRequest) -> CompletionResponse {
        CompletionResponse::new(
            Self::fallback_for(request),
            format!("{}-fallback", self.provider_info().name),
        )
    }
}

#[async_trait]
impl<P: AiProvider> AiProvider for ResilientAiProvider<P> {
    /// Never returns `Err`: exhausted retries and non-retryable failures both
    /// degrade to the fallback reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let mut attempt = 1;

        loop {
            match self.inner.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff_for(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "provider call failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "provider call failed, using fallback reply");
                    return Ok(self.fallback_response(&request));
                }
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.inner.provider_info()
    }
}
