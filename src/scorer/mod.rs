//! Sentiment scorer integration.
//!
//! The classifier only sees the [`SentimentScorer`] trait. Backends:
//! - **HTTP**: hosted text-classification model ([`HttpScorer`])
//! - **Timeout**: decorator bounding any scorer's latency ([`TimeoutScorer`])
//!
//! Tests substitute deterministic stubs.

mod http;
mod timeout;

pub use http::HttpScorer;
pub use timeout::TimeoutScorer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ScorerConfig;
use crate::error::ScorerError;

/// External capability that rates a normalized text.
///
/// Returns one binary-polarity confidence in [0, 1]. Retry policy, if any,
/// belongs to the implementation, not to the classifier.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Scorer name for logs and error messages.
    fn name(&self) -> &str;

    /// Score a normalized text. Behaviour on empty input is up to the scorer.
    async fn score(&self, text: &str) -> Result<f64, ScorerError>;
}

/// Create the hosted-model scorer, wrapped in the configured timeout.
pub fn create_scorer(config: &ScorerConfig) -> Result<Arc<dyn SentimentScorer>, ScorerError> {
    let http = HttpScorer::new(config)?;
    tracing::info!("Using HTTP sentiment scorer ({})", config.url);
    Ok(Arc::new(TimeoutScorer::new(Arc::new(http), config.timeout)))
}
