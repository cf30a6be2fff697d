//! Deterministic text preprocessing
//!
//! The pipeline must transform raw text exactly as it was transformed at
//! training time; any divergence silently corrupts predictions. Stages run
//! in a fixed order and each is individually toggleable, but the order
//! itself is not configurable.

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopwordFilter;
use regex::Regex;
use serde::{Deserialize, Serialize};
use textcat_core::{Error, Result};
use unicode_segmentation::UnicodeSegmentation;

/// The fixed punctuation set stripped by the punctuation stage
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Stage toggles for the preprocessing pipeline.
///
/// Immutable per pipeline instance; chosen at construction and never
/// mutated mid-request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Lowercase the entire string
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Remove the fixed ASCII punctuation set
    #[serde(default = "default_true")]
    pub strip_punctuation: bool,

    /// Remove characters outside `[a-zA-Z0-9\s]` and collapse whitespace
    #[serde(default = "default_true")]
    pub strip_special_symbols: bool,

    /// Drop tokens present in the language stopword set
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,

    /// Reduce surviving tokens to their dictionary base form
    #[serde(default = "default_true")]
    pub lemmatize: bool,

    /// Locale for the stopword list
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_punctuation: true,
            strip_special_symbols: true,
            remove_stopwords: true,
            lemmatize: true,
            language: default_language(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "english".to_string()
}

/// Pure text-normalization pipeline.
///
/// Linguistic resources (stopword set, lemmatizer rules, compiled
/// regexes) are initialized once at construction and read-only afterward,
/// so `preprocess` needs no locking and runs fully in parallel.
pub struct TextPipeline {
    config: PreprocessConfig,
    stopwords: StopwordFilter,
    lemmatizer: Lemmatizer,
    special_symbols: Regex,
    whitespace_runs: Regex,
}

impl TextPipeline {
    /// Build a pipeline, loading the stopword list for the configured
    /// language.
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        let stopwords = if config.remove_stopwords {
            StopwordFilter::for_language(&config.language)
        } else {
            StopwordFilter::empty()
        };
        Self::with_stopwords(config, stopwords)
    }

    /// Build a pipeline with an explicit stopword set.
    ///
    /// Lets callers pin the exact set the model was trained with instead
    /// of relying on the bundled language lists.
    pub fn with_stopwords(config: PreprocessConfig, stopwords: StopwordFilter) -> Result<Self> {
        let special_symbols = Regex::new(r"[^a-zA-Z0-9\s]")
            .map_err(|e| Error::config(format!("failed to compile symbol pattern: {e}")))?;
        let whitespace_runs = Regex::new(r"\s+")
            .map_err(|e| Error::config(format!("failed to compile whitespace pattern: {e}")))?;

        Ok(Self {
            config,
            stopwords,
            lemmatizer: Lemmatizer::new(),
            special_symbols,
            whitespace_runs,
        })
    }

    /// The configuration this pipeline was built with
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Normalize raw text into the token string the vectorizer expects.
    ///
    /// Pure and deterministic: byte-identical input produces byte-identical
    /// output across calls and process restarts. An input that loses every
    /// token yields the empty string rather than an error.
    pub fn preprocess(&self, text: &str) -> String {
        let mut text = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if self.config.strip_punctuation {
            text.retain(|c| !PUNCTUATION.contains(c));
        }

        if self.config.strip_special_symbols {
            let cleaned = self.special_symbols.replace_all(&text, "");
            text = self.whitespace_runs.replace_all(&cleaned, " ").into_owned();
        }

        let mut tokens = Vec::new();
        for token in text.unicode_words() {
            if self.config.remove_stopwords && self.stopwords.is_stopword(token) {
                continue;
            }
            if self.config.lemmatize {
                tokens.push(self.lemmatizer.lemmatize(token));
            } else {
                tokens.push(token.to_string());
            }
        }

        tokens.join(" ")
    }
}
