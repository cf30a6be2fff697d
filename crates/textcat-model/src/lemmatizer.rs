//! Dictionary-form reduction for English tokens
//!
//! Mirrors the noun-morphology detachment rules the training pipeline
//! applies, so serving-time tokens reduce to the same base forms. Tokens
//! are expected to be lowercase by the time they reach the lemmatizer.

use std::collections::HashMap;

/// Suffix detachment rules, tried in order. Longest suffixes first so
/// "churches" hits `ches -> ch` before the bare plural rule.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("ies", "y"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ses", "s"),
];

/// Irregular forms that no suffix rule can reach.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Reduces tokens to their dictionary base form.
///
/// Pure lookup plus suffix rules; built once at startup, no I/O.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    /// Create a lemmatizer with the built-in English rule set
    pub fn new() -> Self {
        Self {
            exceptions: EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Reduce a single token to its base form.
    ///
    /// Tokens too short to carry a plural suffix pass through unchanged.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(base) = self.exceptions.get(token) {
            return (*base).to_string();
        }

        for (suffix, replacement) in DETACHMENT_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.len() >= 2 {
                    return format!("{stem}{replacement}");
                }
            }
        }

        // Bare plural: strip a trailing "s" unless the token looks like a
        // singular that happens to end in s ("glass", "status", "analysis").
        if token.len() > 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return token[..token.len() - 1].to_string();
        }

        token.to_string()
    }
}
