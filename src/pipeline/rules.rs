//! Heuristic phrase rules.
//!
//! Runs before the sentiment scorer to short-circuit obvious replies:
//! - decline phrases ("not interested", "unsubscribe", ...) → NotInterested
//! - enthusiasm phrases ("sounds great", "tell me more", ...) → Interested
//! - hedging phrases ("maybe later", "not sure", ...) → Neutral
//!
//! Lists are scanned in [`Category::PRECEDENCE`] order and the first hit
//! wins. Matching is plain substring containment: no word boundaries, no
//! stemming, so a bare "no" also fires inside "know" or "nothing".

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::pipeline::normalize::fold_phrase;
use crate::pipeline::types::{Category, HeuristicMatch};

const DEFAULT_NOT_INTERESTED: &[&str] = &[
    "not interested",
    "unsubscribe",
    "stop emailing",
    "no thanks",
    "no",
];

const DEFAULT_INTERESTED: &[&str] = &[
    "sounds great",
    "tell me more",
    "very interested",
    "let's meet",
    "interested",
];

const DEFAULT_NEUTRAL: &[&str] = &[
    "i'll think about it",
    "i'll review",
    "maybe later",
    "currently reviewing",
    "will consider",
    "will look into it",
    "need more time",
    "undecided",
    "not sure",
    "possibly",
];

/// A single trigger phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Phrase as configured (lowercased), reported on a match.
    pub text: String,
    /// Phrase folded into normalized-text form, used for matching.
    pattern: String,
}

/// Phrase lists as they appear in a phrase file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhraseLists {
    #[serde(default)]
    pub not_interested: Vec<String>,
    #[serde(default)]
    pub interested: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
}

/// Ordered trigger phrases per category. Immutable once built.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    not_interested: Vec<Phrase>,
    interested: Vec<Phrase>,
    neutral: Vec<Phrase>,
}

impl PhraseTable {
    /// Build a table from three ordered lists.
    ///
    /// Fails if every list is empty, if a phrase has no letters or digits,
    /// or if the same phrase is configured for two categories.
    pub fn new<S: AsRef<str>>(
        not_interested: &[S],
        interested: &[S],
        neutral: &[S],
    ) -> Result<Self, ConfigError> {
        let table = Self {
            not_interested: compile(Category::NotInterested, not_interested)?,
            interested: compile(Category::Interested, interested)?,
            neutral: compile(Category::Neutral, neutral)?,
        };
        table.validate()?;
        Ok(table)
    }

    /// Build a table from deserialized phrase lists.
    pub fn from_lists(lists: &PhraseLists) -> Result<Self, ConfigError> {
        Self::new(&lists.not_interested, &lists.interested, &lists.neutral)
    }

    /// Load phrase lists from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::PhraseFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let lists: PhraseLists =
            serde_json::from_str(&raw).map_err(|e| ConfigError::PhraseFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::from_lists(&lists)
    }

    /// Phrases for one category, in scan order.
    pub fn phrases(&self, category: Category) -> &[Phrase] {
        match category {
            Category::NotInterested => &self.not_interested,
            Category::Interested => &self.interested,
            Category::Neutral => &self.neutral,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if Category::PRECEDENCE
            .iter()
            .all(|c| self.phrases(*c).is_empty())
        {
            return Err(ConfigError::EmptyPhraseTable);
        }

        for (i, first) in Category::PRECEDENCE.iter().enumerate() {
            for second in &Category::PRECEDENCE[i + 1..] {
                for phrase in self.phrases(*first) {
                    if self
                        .phrases(*second)
                        .iter()
                        .any(|p| p.pattern == phrase.pattern)
                    {
                        return Err(ConfigError::DuplicatePhrase {
                            phrase: phrase.text.clone(),
                            first: *first,
                            second: *second,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for PhraseTable {
    /// The stock outreach vocabulary.
    fn default() -> Self {
        fn build(phrases: &[&str]) -> Vec<Phrase> {
            phrases
                .iter()
                .map(|p| Phrase {
                    text: p.to_string(),
                    pattern: fold_phrase(p),
                })
                .collect()
        }
        Self {
            not_interested: build(DEFAULT_NOT_INTERESTED),
            interested: build(DEFAULT_INTERESTED),
            neutral: build(DEFAULT_NEUTRAL),
        }
    }
}

fn compile<S: AsRef<str>>(category: Category, phrases: &[S]) -> Result<Vec<Phrase>, ConfigError> {
    phrases
        .iter()
        .map(|p| {
            let text = p.as_ref().trim().to_lowercase();
            let pattern = fold_phrase(&text);
            if pattern.is_empty() {
                return Err(ConfigError::EmptyPhrase {
                    category,
                    phrase: p.as_ref().to_string(),
                });
            }
            Ok(Phrase { text, pattern })
        })
        .collect()
}

/// Scan already-normalized text for trigger phrases.
///
/// `text` must be the output of
/// [`normalize`](crate::pipeline::normalize::normalize), or text in the same
/// form. Phrases are stored folded (`"let's meet"` becomes `"let s meet"`),
/// so raw text with punctuation inside a phrase will not match it. Only
/// case is folded here.
///
/// Returns the first hit in precedence order, or `None` if no phrase from
/// any list occurs (fall through to the scorer).
pub fn heuristic_check(text: &str, table: &PhraseTable) -> Option<HeuristicMatch> {
    let haystack = text.to_lowercase();
    if haystack.is_empty() {
        return None;
    }

    for category in Category::PRECEDENCE {
        if let Some(phrase) = table
            .phrases(category)
            .iter()
            .find(|p| haystack.contains(&p.pattern))
        {
            debug!(
                category = %category,
                phrase = %phrase.text,
                "Text matched heuristic phrase"
            );
            return Some(HeuristicMatch {
                category,
                phrase: phrase.text.clone(),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize::normalize;

    fn check(raw: &str) -> Option<HeuristicMatch> {
        heuristic_check(normalize(raw).as_str(), &PhraseTable::default())
    }

    fn hit(category: Category, phrase: &str) -> Option<HeuristicMatch> {
        Some(HeuristicMatch {
            category,
            phrase: phrase.into(),
        })
    }

    #[test]
    fn decline_beats_everything() {
        // Normalizer would cut at "thanks", so feed the pre-cut form directly.
        assert_eq!(
            heuristic_check("No thanks not interested in this offer", &PhraseTable::default()),
            hit(Category::NotInterested, "not interested")
        );
    }

    #[test]
    fn detects_interest() {
        assert_eq!(
            check("This sounds great! I'd love to learn more."),
            hit(Category::Interested, "sounds great")
        );
    }

    #[test]
    fn apostrophe_phrases_match_after_folding() {
        assert_eq!(
            check("Sure, let's meet on Friday."),
            hit(Category::Interested, "let's meet")
        );
        assert_eq!(
            check("I'll think about it over the weekend."),
            hit(Category::Neutral, "i'll think about it")
        );
    }

    #[test]
    fn raw_text_must_be_normalized_first() {
        let table = PhraseTable::default();
        let raw = "Sure, let's meet Friday";
        assert_eq!(heuristic_check(raw, &table), None);
        assert_eq!(
            heuristic_check(normalize(raw).as_str(), &table),
            hit(Category::Interested, "let's meet")
        );
    }

    #[test]
    fn detects_neutral() {
        assert_eq!(
            check("Maybe later in the year."),
            hit(Category::Neutral, "maybe later")
        );
    }

    #[test]
    fn no_match_falls_through() {
        assert_eq!(check("I will review your proposal and get back to you."), None);
        assert_eq!(check("This email is ambiguous and unclear."), None);
    }

    #[test]
    fn empty_text_has_no_match() {
        assert_eq!(check(""), None);
    }

    #[test]
    fn bare_no_fires_inside_words() {
        // "know" contains "no": permissive matching favours decline recall.
        assert_eq!(
            check("Let me know the price, sounds great"),
            hit(Category::NotInterested, "no")
        );
    }

    #[test]
    fn interested_beats_neutral() {
        assert_eq!(
            check("Tell me more, though I'm undecided"),
            hit(Category::Interested, "tell me more")
        );
    }

    #[test]
    fn first_phrase_in_list_order_is_reported() {
        // "very interested" and "interested" both occur; list order decides.
        let table = PhraseTable::new::<&str>(&[], &["very interested", "interested"], &[]).unwrap();
        assert_eq!(
            heuristic_check(normalize("We are very interested").as_str(), &table),
            hit(Category::Interested, "very interested")
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let table = PhraseTable::new(&["UNSUBSCRIBE"], &["x"], &["y"]).unwrap();
        assert_eq!(
            heuristic_check(normalize("Please Unsubscribe me").as_str(), &table),
            hit(Category::NotInterested, "unsubscribe")
        );
    }

    #[test]
    fn rejects_all_empty_table() {
        let err = PhraseTable::new::<&str>(&[], &[], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPhraseTable));
    }

    #[test]
    fn allows_some_empty_lists() {
        let table = PhraseTable::new::<&str>(&["nope"], &[], &[]).unwrap();
        assert!(table.phrases(Category::Interested).is_empty());
        assert_eq!(table.phrases(Category::NotInterested).len(), 1);
    }

    #[test]
    fn rejects_punctuation_only_phrase() {
        let err = PhraseTable::new(&["..."], &["yes"], &["hm"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyPhrase {
                category: Category::NotInterested,
                ..
            }
        ));
    }

    #[test]
    fn rejects_phrase_shared_between_categories() {
        let err = PhraseTable::new(&["maybe"], &["yes"], &["Maybe!"]).unwrap_err();
        match err {
            ConfigError::DuplicatePhrase { first, second, .. } => {
                assert_eq!(first, Category::NotInterested);
                assert_eq!(second, Category::Neutral);
            }
            other => panic!("Expected DuplicatePhrase, got {:?}", other),
        }
    }

    #[test]
    fn default_table_is_valid() {
        let table = PhraseTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.phrases(Category::NotInterested).len(), 5);
        assert_eq!(table.phrases(Category::Interested).len(), 5);
        assert_eq!(table.phrases(Category::Neutral).len(), 10);
    }

    #[test]
    fn loads_phrase_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrases.json");
        std::fs::write(
            &path,
            r#"{"not_interested": ["go away"], "interested": ["count me in"]}"#,
        )
        .unwrap();

        let table = PhraseTable::from_json_file(&path).unwrap();
        assert!(table.phrases(Category::Neutral).is_empty());
        assert_eq!(
            heuristic_check(normalize("Count me in!").as_str(), &table),
            hit(Category::Interested, "count me in")
        );
    }

    #[test]
    fn bad_phrase_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrases.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            PhraseTable::from_json_file(&path),
            Err(ConfigError::PhraseFile { .. })
        ));
        assert!(matches!(
            PhraseTable::from_json_file(&dir.path().join("missing.json")),
            Err(ConfigError::PhraseFile { .. })
        ));
    }
}
