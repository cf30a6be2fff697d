//! Stopword filtering
//!
//! Language stopword lists come from the `stop_words` crate; custom lists
//! are supported so tests can pin an exact set.

use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

/// A filter for dropping stopwords from tokenized text.
///
/// Matching is exact: the pipeline lowercases before tokenizing, and the
/// backing lists are lowercase, so no per-token case folding happens here.
/// That keeps filtering byte-deterministic with the training-time setup.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::for_language("english")
    }
}

impl StopwordFilter {
    /// Create a filter for the given language.
    ///
    /// Unknown languages fall back to English.
    pub fn for_language(language: &str) -> Self {
        let lang = match language.to_ascii_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            _ => LANGUAGE::English,
        };
        Self {
            words: get(lang).into_iter().collect(),
        }
    }

    /// Create an empty filter (no filtering)
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Create a filter from a fixed word list
    pub fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a token is a stopword (exact match)
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
