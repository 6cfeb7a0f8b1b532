use std::path::PathBuf;

use email_sentiment::config::{ClassifierConfig, ScorerConfig};
use email_sentiment::inbox::load_emails;
use email_sentiment::pipeline::{Classifier, DecisionSource};
use email_sentiment::scorer::create_scorer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "analysis.log";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Console at RUST_LOG (default info), full debug trail in logs/analysis.log
    std::fs::create_dir_all(LOG_DIR)?;
    let (log_writer, _log_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(LOG_DIR, LOG_FILE));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer)
                .with_filter(EnvFilter::new("debug")),
        )
        .init();

    let email_dir: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SENTIMENT_EMAIL_DIR").ok())
        .unwrap_or_else(|| "test_emails".to_string())
        .into();

    let classifier_config = ClassifierConfig::from_env()?;
    let scorer_config = ScorerConfig::from_env()?;

    eprintln!("📬 Email Sentiment v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Emails: {}", email_dir.display());
    eprintln!("   Scorer: {}", scorer_config.url);
    eprintln!(
        "   Thresholds: interested > {}, not interested < {}",
        classifier_config.thresholds.interested(),
        classifier_config.thresholds.not_interested()
    );

    let scorer = create_scorer(&scorer_config)?;
    let classifier = Classifier::new(scorer, classifier_config);

    let emails = load_emails(&email_dir).await?;
    if emails.is_empty() {
        eprintln!("   No .txt files found in {}", email_dir.display());
        return Ok(());
    }

    for email in &emails {
        tracing::info!(
            path = %email.path.display(),
            preview = %email.preview(100),
            "Processing email"
        );
    }

    let bodies: Vec<&str> = emails.iter().map(|e| e.content.as_str()).collect();
    let results = classifier.classify_all(&bodies).await;

    let mut failed = 0usize;
    for (email, result) in emails.iter().zip(results) {
        match result {
            Ok(result) => match (result.source(), result.score()) {
                (DecisionSource::ScoreBased, Some(score)) => {
                    println!("{}: {} ({})", email.path.display(), result.category(), score);
                }
                _ => {
                    println!(
                        "{}: {} (Heuristic)",
                        email.path.display(),
                        result.category()
                    );
                }
            },
            Err(e) => {
                failed += 1;
                tracing::error!(path = %email.path.display(), error = %e, "Classification failed");
                println!("{}: error ({})", email.path.display(), e);
            }
        }
    }

    eprintln!(
        "   Classified {} of {} emails",
        emails.len() - failed,
        emails.len()
    );
    Ok(())
}
