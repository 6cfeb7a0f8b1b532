//! Email body normalization.
//!
//! Turns a raw email body into the canonical form used for phrase
//! matching and scoring:
//! 1. strip URLs (`scheme://` followed by non-whitespace)
//! 2. strip email-address-like tokens (non-whitespace containing `@`)
//! 3. collapse every run of non-alphanumeric ASCII characters to one space
//! 4. cut everything from the first sign-off token onwards
//! 5. trim
//!
//! The result is a fixed point: normalizing it again changes nothing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Closing phrases that mark the start of the signature block.
pub const SIGN_OFFS: [&str; 5] = ["regards", "cheers", "sincerely", "thanks", "thank you"];

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[a-z][a-z0-9+.\-]*://\S+").unwrap());

static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S*@\S*").unwrap());

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

static SIGN_OFF: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = SIGN_OFFS.iter().map(|s| regex::escape(s)).collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
});

/// Cleaned email text: ASCII letters, digits and single spaces only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw email body. Pure; empty input gives empty output.
pub fn normalize(raw: &str) -> NormalizedText {
    let text = URL.replace_all(raw, "");
    let text = EMAIL_ADDRESS.replace_all(&text, "");
    let text = NON_ALPHANUMERIC.replace_all(&text, " ");

    let body = match SIGN_OFF.find(&text) {
        Some(m) => &text[..m.start()],
        None => &text[..],
    };

    NormalizedText(body.trim().to_string())
}

/// Fold a configured phrase into the form it takes inside normalized text:
/// lowercase, punctuation runs collapsed to one space, trimmed.
pub(crate) fn fold_phrase(phrase: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&phrase.to_lowercase(), " ")
        .trim()
        .to_string()
}
