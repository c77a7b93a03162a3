use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

use crate::config::RetryConfig;
use crate::error::Result;
use crate::llm::provider::CompletionService;
use crate::models::CompletionRequest;

/// Retries transient completion failures with exponential backoff.
///
/// Only errors where [`crate::Error::is_retryable`] holds are retried: rate limits,
/// transport failures and 5xx responses. A server `retry-after` hint wins when it is
/// longer than the computed backoff.
pub struct RetryingProvider {
    inner: Arc<dyn CompletionService>,
    config: RetryConfig,
}

impl RetryingProvider {
    pub fn new(inner: Arc<dyn CompletionService>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    fn backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let computed = Duration::from_millis(
            self.config
                .base_delay_ms
                .saturating_mul(1u64 << attempt.min(16)),
        );
        match retry_after {
            Some(secs) => computed.max(Duration::from_secs(secs)),
            None => computed,
        }
    }
}

#[async_trait]
impl CompletionService for RetryingProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(request.clone()).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let wait = self.backoff(attempt, e.retry_after());
                    attempt += 1;
                    tracing::warn!(
                        "{} call failed ({}), retry {}/{} in {:?}",
                        self.inner.name(),
                        e,
                        attempt,
                        self.config.max_retries,
                        wait
                    );
                    sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
