//! Sentiment labels and the keyword heuristic that stands in for a model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Words that mark a text as positive when present anywhere in it
pub const POSITIVE_TRIGGER_WORDS: [&str; 4] = ["good", "great", "amazing", "excellent"];

/// Binary sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Classify text by keyword presence.
    ///
    /// Matching is case-insensitive and substring based, so `"Goodness"`
    /// counts as positive. There is no neutral class.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        if POSITIVE_TRIGGER_WORDS
            .iter()
            .any(|word| lowered.contains(word))
        {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
