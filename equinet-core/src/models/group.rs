use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_UNDERREPRESENTED_KEYWORDS;

/// Demographic-proxy group derived from a record's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Underrepresented,
    Mainstream,
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underrepresented => f.write_str("underrepresented"),
            Self::Mainstream => f.write_str("mainstream"),
        }
    }
}

/// Assigns [`GroupLabel`]s by case-insensitive substring match on `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupClassifier {
    keywords: Vec<String>,
}

impl GroupClassifier {
    /// Build a classifier from keywords. Empty keywords are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn classify(&self, source: &str) -> GroupLabel {
        let source = source.to_lowercase();
        if self.keywords.iter().any(|k| source.contains(k.as_str())) {
            GroupLabel::Underrepresented
        } else {
            GroupLabel::Mainstream
        }
    }
}

impl Default for GroupClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_UNDERREPRESENTED_KEYWORDS)
    }
}
