//! Hosted text-classification model over HTTP.
//!
//! Speaks the inference-API convention: POST `{"inputs": "<text>"}`, get
//! back predictions sorted by confidence, either flat
//! (`[{"label": "POSITIVE", "score": 0.98}, ...]`) or nested one level per
//! input (`[[...]]`). The top prediction's score is the result.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::config::ScorerConfig;
use crate::error::ScorerError;
use crate::scorer::SentimentScorer;

const SCORER_NAME: &str = "http";

/// One label/score pair from the model.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Prediction {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionResponse {
    Nested(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

/// Scorer backed by a hosted sentiment model.
pub struct HttpScorer {
    client: reqwest::Client,
    url: String,
    api_token: Option<SecretString>,
}

impl HttpScorer {
    pub fn new(config: &ScorerConfig) -> Result<Self, ScorerError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ScorerError::Unavailable {
                scorer: SCORER_NAME.to_string(),
                reason: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            url: config.url.clone(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl SentimentScorer for HttpScorer {
    fn name(&self) -> &str {
        SCORER_NAME
    }

    async fn score(&self, text: &str) -> Result<f64, ScorerError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| ScorerError::Unavailable {
            scorer: SCORER_NAME.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ScorerError::RequestFailed {
            scorer: SCORER_NAME.to_string(),
            reason: format!("failed to read body: {e}"),
        })?;

        if status == StatusCode::SERVICE_UNAVAILABLE {
            // Hosted models answer 503 while loading.
            return Err(ScorerError::Unavailable {
                scorer: SCORER_NAME.to_string(),
                reason: format!("HTTP {status}: {}", preview(&body)),
            });
        }
        if !status.is_success() {
            return Err(ScorerError::RequestFailed {
                scorer: SCORER_NAME.to_string(),
                reason: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        let top = parse_top_prediction(&body)?;
        debug!(label = %top.label, score = top.score, "Scorer prediction");
        Ok(top.score)
    }
}

/// Pick the first prediction out of a flat or nested response body.
pub(crate) fn parse_top_prediction(body: &str) -> Result<Prediction, ScorerError> {
    let invalid = |reason: String| ScorerError::InvalidResponse {
        scorer: SCORER_NAME.to_string(),
        reason,
    };

    let parsed: PredictionResponse = serde_json::from_str(body)
        .map_err(|e| invalid(format!("{e}: {}", preview(body))))?;

    let top = match parsed {
        PredictionResponse::Nested(batches) => batches
            .into_iter()
            .next()
            .and_then(|batch| batch.into_iter().next()),
        PredictionResponse::Flat(predictions) => predictions.into_iter().next(),
    };

    top.ok_or_else(|| invalid("response contained no predictions".into()))
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_response() {
        let body = r#"[{"label": "POSITIVE", "score": 0.98}, {"label": "NEGATIVE", "score": 0.02}]"#;
        let top = parse_top_prediction(body).unwrap();
        assert_eq!(top.label, "POSITIVE");
        assert!((top.score - 0.98).abs() < 1e-9);
    }

    #[test]
    fn parses_nested_response() {
        let body = r#"[[{"label": "NEGATIVE", "score": 0.91}, {"label": "POSITIVE", "score": 0.09}]]"#;
        let top = parse_top_prediction(body).unwrap();
        assert_eq!(top.label, "NEGATIVE");
        assert!((top.score - 0.91).abs() < 1e-9);
    }

    #[test]
    fn empty_response_is_invalid() {
        assert!(matches!(
            parse_top_prediction("[]"),
            Err(ScorerError::InvalidResponse { .. })
        ));
        assert!(matches!(
            parse_top_prediction("[[]]"),
            Err(ScorerError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn error_body_is_invalid() {
        let err = parse_top_prediction(r#"{"error": "Model is loading"}"#).unwrap_err();
        assert!(matches!(err, ScorerError::InvalidResponse { .. }));
        assert!(err.to_string().contains("Model is loading"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let config = ScorerConfig {
            // Port 9 on localhost: discard service, normally closed.
            url: "http://127.0.0.1:9/score".into(),
            ..Default::default()
        };
        let scorer = HttpScorer::new(&config).unwrap();
        let err = scorer.score("hello").await.unwrap_err();
        assert!(err.is_unavailable(), "got {err:?}");
    }
}
