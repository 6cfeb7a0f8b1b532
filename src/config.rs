//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::pipeline::rules::PhraseTable;

/// Default hosted sentiment model (binary SST-2 polarity).
pub const DEFAULT_SCORER_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Cut points for turning a scorer confidence into a category.
///
/// Invariant: `0 <= not_interested < interested <= 1`. Both bounds are
/// exclusive when bucketing, so a score equal to either is Neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdConfig {
    interested: f64,
    not_interested: f64,
}

impl ThresholdConfig {
    pub const DEFAULT_INTERESTED: f64 = 0.7;
    pub const DEFAULT_NOT_INTERESTED: f64 = 0.3;

    pub fn new(interested: f64, not_interested: f64) -> Result<Self, ConfigError> {
        let ordered = (0.0..=1.0).contains(&not_interested)
            && (0.0..=1.0).contains(&interested)
            && not_interested < interested;
        if !ordered {
            return Err(ConfigError::InvalidThresholds {
                interested,
                not_interested,
            });
        }
        Ok(Self {
            interested,
            not_interested,
        })
    }

    pub fn interested(&self) -> f64 {
        self.interested
    }

    pub fn not_interested(&self) -> f64 {
        self.not_interested
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            interested: Self::DEFAULT_INTERESTED,
            not_interested: Self::DEFAULT_NOT_INTERESTED,
        }
    }
}

/// Default cap on scorer calls in flight during batch classification.
pub const DEFAULT_SCORER_CONCURRENCY: usize = 4;

/// Everything the classifier needs besides the scorer itself.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub phrases: PhraseTable,
    pub thresholds: ThresholdConfig,
    /// Maximum emails classified at once by `classify_all`. Zero is treated
    /// as one.
    pub concurrency: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            phrases: PhraseTable::default(),
            thresholds: ThresholdConfig::default(),
            concurrency: DEFAULT_SCORER_CONCURRENCY,
        }
    }
}

impl ClassifierConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// - `SENTIMENT_INTERESTED_THRESHOLD` (default 0.7)
    /// - `SENTIMENT_NOT_INTERESTED_THRESHOLD` (default 0.3)
    /// - `SENTIMENT_PHRASES_PATH` (optional JSON phrase file)
    /// - `SENTIMENT_SCORER_CONCURRENCY` (default 4, must be positive)
    pub fn from_env() -> Result<Self, ConfigError> {
        let interested = env_parse(
            "SENTIMENT_INTERESTED_THRESHOLD",
            ThresholdConfig::DEFAULT_INTERESTED,
        )?;
        let not_interested = env_parse(
            "SENTIMENT_NOT_INTERESTED_THRESHOLD",
            ThresholdConfig::DEFAULT_NOT_INTERESTED,
        )?;
        let thresholds = ThresholdConfig::new(interested, not_interested)?;

        let phrases = match std::env::var("SENTIMENT_PHRASES_PATH") {
            Ok(path) if !path.trim().is_empty() => {
                PhraseTable::from_json_file(&PathBuf::from(path.trim()))?
            }
            _ => PhraseTable::default(),
        };

        let concurrency = env_parse("SENTIMENT_SCORER_CONCURRENCY", DEFAULT_SCORER_CONCURRENCY)?;
        require_positive("SENTIMENT_SCORER_CONCURRENCY", concurrency)?;

        Ok(Self {
            phrases,
            thresholds,
            concurrency,
        })
    }
}

/// Connection settings for the hosted sentiment scorer.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub url: String,
    pub api_token: Option<SecretString>,
    pub timeout: Duration,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCORER_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ScorerConfig {
    /// Build from `SENTIMENT_SCORER_URL`, `SENTIMENT_SCORER_TOKEN` and
    /// `SENTIMENT_SCORER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("SENTIMENT_SCORER_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCORER_URL.to_string());

        let api_token = std::env::var("SENTIMENT_SCORER_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        let timeout_secs: u64 = env_parse("SENTIMENT_SCORER_TIMEOUT_SECS", 30)?;
        require_positive("SENTIMENT_SCORER_TIMEOUT_SECS", timeout_secs)?;

        Ok(Self {
            url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse an optional env var. Unset or blank → default; garbage → error.
fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_value<T>(key: &str, raw: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => {
            value
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{value:?}: {e}"),
                })
        }
        _ => Ok(default),
    }
}

fn require_positive<T>(key: &str, value: T) -> Result<(), ConfigError>
where
    T: PartialOrd + Default,
{
    if value > T::default() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".into(),
        })
    }
}
