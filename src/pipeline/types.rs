//! Shared types for the classification pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────

/// Sentiment category of an outreach reply.
///
/// The three labels are mutually exclusive. They carry no ordering of
/// their own; the heuristic scan order lives in [`Category::PRECEDENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Interested,
    Neutral,
    NotInterested,
}

impl Category {
    /// Order in which phrase lists are scanned by the heuristic stage.
    ///
    /// Decline vocabulary goes first: missing a rejection is the costliest
    /// mistake in sales triage.
    pub const PRECEDENCE: [Category; 3] = [
        Category::NotInterested,
        Category::Interested,
        Category::Neutral,
    ];

    /// Human-readable label ("interested", "neutral", "not interested").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interested => "interested",
            Self::Neutral => "neutral",
            Self::NotInterested => "not interested",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Heuristic match ─────────────────────────────────────────────────

/// A phrase hit from the heuristic stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicMatch {
    pub category: Category,
    /// The trigger phrase as configured in the phrase table.
    pub phrase: String,
}

// ── Classification result ───────────────────────────────────────────

/// Which stage produced the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Heuristic,
    ScoreBased,
}

impl DecisionSource {
    /// Short label for logging and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heuristic => "Heuristic",
            Self::ScoreBased => "ScoreBased",
        }
    }
}

/// Outcome of classifying one email.
///
/// `score` is set only for score-based decisions and `matched_phrase` only
/// for heuristic ones. The constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    category: Category,
    source: DecisionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_phrase: Option<String>,
}

impl ClassificationResult {
    /// Result decided by a phrase hit.
    pub fn heuristic(hit: HeuristicMatch) -> Self {
        Self {
            category: hit.category,
            source: DecisionSource::Heuristic,
            score: None,
            matched_phrase: Some(hit.phrase),
        }
    }

    /// Result decided by bucketing a scorer confidence.
    pub fn scored(category: Category, score: f64) -> Self {
        Self {
            category,
            source: DecisionSource::ScoreBased,
            score: Some(score),
            matched_phrase: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn source(&self) -> DecisionSource {
        self.source
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn matched_phrase(&self) -> Option<&str> {
        self.matched_phrase.as_deref()
    }
}
