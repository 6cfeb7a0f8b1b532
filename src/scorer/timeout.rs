//! Timeout decorator for sentiment scorers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::ScorerError;
use crate::scorer::SentimentScorer;

/// Wraps a scorer and fails with [`ScorerError::Timeout`] when it takes
/// longer than `timeout`.
pub struct TimeoutScorer {
    inner: Arc<dyn SentimentScorer>,
    timeout: Duration,
}

impl TimeoutScorer {
    pub fn new(inner: Arc<dyn SentimentScorer>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl SentimentScorer for TimeoutScorer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn score(&self, text: &str) -> Result<f64, ScorerError> {
        match tokio::time::timeout(self.timeout, self.inner.score(text)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    scorer = self.inner.name(),
                    timeout = ?self.timeout,
                    "Sentiment scorer timed out"
                );
                Err(ScorerError::Timeout {
                    scorer: self.inner.name().to_string(),
                    timeout: self.timeout,
                })
            }
        }
    }
}
