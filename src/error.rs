//! Error types for email sentiment classification.

use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::types::Category;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Scorer error: {0}")]
    Scorer(#[from] ScorerError),

    #[error("Inbox error: {0}")]
    Inbox(#[from] InboxError),
}

/// Configuration errors. Raised while building a classifier, never during
/// classification.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Invalid thresholds: need 0 <= not_interested ({not_interested}) < interested ({interested}) <= 1"
    )]
    InvalidThresholds {
        interested: f64,
        not_interested: f64,
    },

    #[error("Phrase table has no phrases in any category")]
    EmptyPhraseTable,

    #[error("Phrase {phrase:?} in category {category} is empty after normalization")]
    EmptyPhrase { category: Category, phrase: String },

    #[error("Phrase {phrase:?} appears in both {first} and {second}")]
    DuplicatePhrase {
        phrase: String,
        first: Category,
        second: Category,
    },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to load phrase file {}: {reason}", path.display())]
    PhraseFile { path: PathBuf, reason: String },
}

/// Failures of the sentiment scorer collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("Scorer {scorer} unavailable: {reason}")]
    Unavailable { scorer: String, reason: String },

    #[error("Scorer {scorer} timed out after {timeout:?}")]
    Timeout { scorer: String, timeout: Duration },

    #[error("Scorer {scorer} request failed: {reason}")]
    RequestFailed { scorer: String, reason: String },

    #[error("Invalid response from scorer {scorer}: {reason}")]
    InvalidResponse { scorer: String, reason: String },

    #[error("Scorer {scorer} returned {score}, expected a value in [0, 1]")]
    OutOfRange { scorer: String, score: f64 },
}

impl ScorerError {
    /// True when the scorer could not be reached at all (as opposed to
    /// answering with an error or garbage).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}

/// Orchestrator failures. A failed classification never yields a category.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Sentiment scoring failed: {0}")]
    Scorer(#[from] ScorerError),
}

/// Errors reading emails from disk.
#[derive(Debug, thiserror::Error)]
pub enum InboxError {
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read email {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
