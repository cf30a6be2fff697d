//! Label decoder artifact
//!
//! Maps class ids back to the human-readable category names they were
//! encoded from at training time.

use crate::bundle::LabelDecoder;
use serde::{Deserialize, Serialize};
use textcat_core::{Error, Result};

/// Position-indexed label decoder: class id `i` decodes to `classes[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexLabelDecoder {
    classes: Vec<String>,
}

impl IndexLabelDecoder {
    /// Construct a decoder from an ordered label list
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Fit a decoder over training labels: the class list is the sorted
    /// set of unique labels, matching the training-time encoder.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Class id a label encodes to, if known
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Check internal consistency after deserialization
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.classes.is_empty() {
            return Err("empty label list".to_string());
        }
        Ok(())
    }
}

impl LabelDecoder for IndexLabelDecoder {
    fn decode(&self, class_id: usize) -> Result<String> {
        self.classes.get(class_id).cloned().ok_or_else(|| {
            Error::prediction(format!(
                "class id {} out of range for {} labels",
                class_id,
                self.classes.len()
            ))
        })
    }

    fn num_labels(&self) -> usize {
        self.classes.len()
    }
}
