//! Error types for TextCat

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type alias using TextCat's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The three artifact roles produced by training.
///
/// Used in error messages and artifact file headers, so the `Display`
/// form is part of the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Maps a feature vector to a class id and probability distribution
    Classifier,

    /// Maps normalized text to a numeric feature vector
    Vectorizer,

    /// Maps a class id back to its human-readable label
    LabelDecoder,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Classifier => "classifier",
            Self::Vectorizer => "vectorizer",
            Self::LabelDecoder => "label-decoder",
        };
        f.write_str(name)
    }
}

/// Failure while loading an artifact bundle.
///
/// Cloneable so the lifecycle manager can cache a failed load and hand
/// every waiter the same error without re-attempting I/O.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// A required artifact file is missing
    #[error("{kind} artifact not found at {}", path.display())]
    NotFound { kind: ArtifactKind, path: PathBuf },

    /// Artifact bytes are present but unreadable or incompatible
    #[error("failed to deserialize {kind} artifact: {reason}")]
    Deserialization { kind: ArtifactKind, reason: String },
}

impl LoadError {
    /// Create a deserialization error for the given artifact kind
    pub fn deserialization(kind: ArtifactKind, reason: impl Into<String>) -> Self {
        Self::Deserialization {
            kind,
            reason: reason.into(),
        }
    }

    /// The artifact the load failed on
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::NotFound { kind, .. } => *kind,
            Self::Deserialization { kind, .. } => *kind,
        }
    }
}

/// Core error type for TextCat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client-caused input errors (empty text, malformed request)
    #[error("validation error: {0}")]
    Validation(String),

    /// Artifact lifecycle failures; the model is unavailable
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Unexpected failure during transform/predict/decode
    #[error("prediction error: {0}")]
    Prediction(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_kind_and_path() {
        let err = LoadError::NotFound {
            kind: ArtifactKind::Classifier,
            path: PathBuf::from("/models/classifier.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("classifier"));
        assert!(msg.contains("/models/classifier.json"));
    }

    #[test]
    fn load_error_is_cloneable() {
        let err = LoadError::deserialization(ArtifactKind::Vectorizer, "checksum mismatch");
        let copy = err.clone();
        assert_eq!(err, copy);
        assert_eq!(copy.kind(), ArtifactKind::Vectorizer);
    }

    #[test]
    fn artifact_kind_display() {
        assert_eq!(ArtifactKind::LabelDecoder.to_string(), "label-decoder");
        assert_eq!(ArtifactKind::Vectorizer.to_string(), "vectorizer");
    }
}
