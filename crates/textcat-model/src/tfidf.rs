//! TF-IDF vectorizer artifact
//!
//! Feature extraction over already-normalized text: term frequency scaled
//! by smoothed inverse document frequency, L2-normalized, matching the
//! training-time vectorizer. Input tokens are whatever the preprocessing
//! pipeline rejoined with single spaces.

use crate::bundle::Vectorizer;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use textcat_core::Result;

/// TF-IDF vectorizer fitted over a training corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> feature index
    vocabulary: HashMap<String, usize>,

    /// Smoothed inverse document frequency per feature index
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit a vectorizer on normalized training documents.
    ///
    /// Vocabulary indices follow first-occurrence order over the corpus,
    /// which keeps fitting deterministic for a fixed document order.
    /// IDF uses the smoothed form `ln((n + 1) / (df + 1)) + 1`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n_documents = documents.len();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in doc.as_ref().split_whitespace() {
                if !seen.insert(token) {
                    continue;
                }
                match vocabulary.get(token) {
                    Some(&idx) => document_frequency[idx] += 1,
                    None => {
                        vocabulary.insert(token.to_string(), vocabulary.len());
                        document_frequency.push(1);
                    }
                }
            }
        }

        let idf = document_frequency
            .iter()
            .map(|&df| ((n_documents as f32 + 1.0) / (df as f32 + 1.0)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Number of terms in the vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Feature index of a term, if it was seen during fitting
    pub fn vocabulary_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Check internal consistency after deserialization
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.vocabulary.is_empty() {
            return Err("empty vocabulary".to_string());
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(format!(
                "idf length {} does not match vocabulary size {}",
                self.idf.len(),
                self.vocabulary.len()
            ));
        }
        for (term, &idx) in &self.vocabulary {
            if idx >= self.idf.len() {
                return Err(format!("term {term:?} maps to out-of-range index {idx}"));
            }
        }
        Ok(())
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<Vec<f32>> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut features = vec![0.0f32; self.idf.len()];

        // Term frequency; out-of-vocabulary tokens are ignored
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(*token) {
                features[idx] += 1.0;
            }
        }

        // Empty input transforms to the zero vector
        if tokens.is_empty() {
            return Ok(features);
        }

        let doc_length = tokens.len() as f32;
        for (idx, value) in features.iter_mut().enumerate() {
            *value = *value / doc_length * self.idf[idx];
        }

        // L2 normalization, as applied at training time
        let norm = features.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}
