//! Core types for TextCat

use serde::{Deserialize, Serialize};

/// Result of classifying one text string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Human-readable category label
    pub label: String,

    /// Maximum probability in the classifier's output distribution (0.0-1.0)
    pub confidence: f32,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_round_trips_through_json() {
        let p = Prediction::new("spam", 0.93);
        let json = serde_json::to_string(&p).unwrap();
        let back: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
