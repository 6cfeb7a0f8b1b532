//! Classifier: runs one email through the pipeline.
//!
//! **Core invariant: a failed scorer call never turns into a category.**
//! The caller always sees either a result or a typed error.
//!
//! Flow:
//! 1. Normalizer → canonical text
//! 2. Heuristic phrase rules (fast, no scorer) → may short-circuit
//! 3. Sentiment scorer → confidence bucketed by thresholds

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::{ClassifierConfig, ThresholdConfig};
use crate::error::{ClassifyError, ScorerError};
use crate::pipeline::normalize::normalize;
use crate::pipeline::rules::{PhraseTable, heuristic_check};
use crate::pipeline::scoring::classify_by_score;
use crate::pipeline::types::ClassificationResult;
use crate::scorer::SentimentScorer;

/// Classify one raw email body.
///
/// The scorer is only called when no trigger phrase matches. Its failures
/// propagate unchanged; a score outside [0, 1] is rejected as
/// [`ScorerError::OutOfRange`].
pub async fn classify(
    raw: &str,
    phrases: &PhraseTable,
    scorer: &dyn SentimentScorer,
    thresholds: &ThresholdConfig,
) -> Result<ClassificationResult, ClassifyError> {
    let normalized = normalize(raw);

    // Step 1: phrase rules (fast path)
    if let Some(hit) = heuristic_check(normalized.as_str(), phrases) {
        debug!(
            category = %hit.category,
            phrase = %hit.phrase,
            "Heuristic matched, skipping scorer"
        );
        return Ok(ClassificationResult::heuristic(hit));
    }

    // Step 2: scorer (slow path)
    let score = scorer.score(normalized.as_str()).await.map_err(|e| {
        warn!(scorer = scorer.name(), error = %e, "Sentiment scorer failed");
        e
    })?;

    if !(0.0..=1.0).contains(&score) {
        warn!(scorer = scorer.name(), score, "Scorer returned out-of-range value");
        return Err(ScorerError::OutOfRange {
            scorer: scorer.name().to_string(),
            score,
        }
        .into());
    }

    let category = classify_by_score(score, thresholds);
    Ok(ClassificationResult::scored(category, score))
}

/// Email sentiment classifier.
///
/// Holds the immutable configuration and the injected scorer. Stateless
/// across calls, so one instance can serve any number of concurrent
/// `classify` calls.
pub struct Classifier {
    scorer: Arc<dyn SentimentScorer>,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(scorer: Arc<dyn SentimentScorer>, config: ClassifierConfig) -> Self {
        Self { scorer, config }
    }

    /// Classifier with the stock phrase table and thresholds.
    pub fn with_defaults(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self::new(scorer, ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a single email body.
    pub async fn classify(&self, raw: &str) -> Result<ClassificationResult, ClassifyError> {
        let result = classify(
            raw,
            &self.config.phrases,
            self.scorer.as_ref(),
            &self.config.thresholds,
        )
        .await?;

        info!(
            category = %result.category(),
            source = result.source().label(),
            score = ?result.score(),
            phrase = ?result.matched_phrase(),
            "Classified email"
        );
        Ok(result)
    }

    /// Classify independent emails concurrently, at most
    /// `config.concurrency` at a time.
    ///
    /// Returns one entry per input, in input order. A failure on one email
    /// does not affect the others.
    pub async fn classify_all<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> Vec<Result<ClassificationResult, ClassifyError>> {
        let limit = self.config.concurrency.max(1);
        info!(count = texts.len(), limit, "Classifying email batch");
        let results: Vec<_> = stream::iter(texts)
            .map(|t| self.classify(t.as_ref()))
            .buffered(limit)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            classified = results.len() - failed,
            failed,
            "Batch classification complete"
        );
        results
    }
}
