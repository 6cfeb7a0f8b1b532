//! Email sentiment classification pipeline.
//!
//! Every email body flows through:
//! 1. `normalize()`: strip URLs, addresses, punctuation and the sign-off
//! 2. `heuristic_check()`: fast phrase matching (no scorer)
//! 3. `classify_by_score()`: scorer confidence bucketed by thresholds
//!
//! **No silent fallback category.** If the scorer fails, so does the call.

pub mod normalize;
pub mod processor;
pub mod rules;
pub mod scoring;
pub mod types;

pub use normalize::{NormalizedText, normalize};
pub use processor::{Classifier, classify};
pub use rules::{PhraseTable, heuristic_check};
pub use scoring::classify_by_score;
pub use types::{Category, ClassificationResult, DecisionSource, HeuristicMatch};
