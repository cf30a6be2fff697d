//! Capability traits and the loaded artifact bundle

use std::sync::Arc;
use textcat_core::Result;

/// Capability mapping normalized text to a numeric feature vector
pub trait Vectorizer: Send + Sync {
    /// Transform normalized text into a feature vector.
    ///
    /// Empty text must yield an all-zero vector, not an error.
    fn transform(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimensionality of the produced vectors
    fn dimension(&self) -> usize;
}

/// Outcome of a single classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassOutcome {
    /// Predicted class id (argmax of the probability distribution)
    pub class_id: usize,

    /// Maximum probability in the distribution (0.0-1.0)
    pub confidence: f32,
}

/// Capability mapping a feature vector to a class id and confidence
pub trait ClassifierModel: Send + Sync {
    fn predict(&self, features: &[f32]) -> Result<ClassOutcome>;

    /// Number of classes in the output distribution
    fn num_classes(&self) -> usize;
}

/// Capability mapping a class id back to its human-readable label
pub trait LabelDecoder: Send + Sync {
    fn decode(&self, class_id: usize) -> Result<String>;

    /// Number of known labels
    fn num_labels(&self) -> usize;
}

/// The loaded classification tools, held together as one atomic unit.
///
/// Immutable once constructed: all three capabilities are present or the
/// bundle does not exist. Cloning is cheap (three `Arc`s), which is what
/// lets the lifecycle manager hand out snapshots that stay valid across a
/// concurrent reload.
#[derive(Clone)]
pub struct ArtifactBundle {
    classifier: Arc<dyn ClassifierModel>,
    vectorizer: Arc<dyn Vectorizer>,
    labels: Arc<dyn LabelDecoder>,
}

impl ArtifactBundle {
    /// Construct a bundle from its three capabilities
    pub fn new(
        classifier: Arc<dyn ClassifierModel>,
        vectorizer: Arc<dyn Vectorizer>,
        labels: Arc<dyn LabelDecoder>,
    ) -> Self {
        Self {
            classifier,
            vectorizer,
            labels,
        }
    }

    pub fn classifier(&self) -> &dyn ClassifierModel {
        self.classifier.as_ref()
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn labels(&self) -> &dyn LabelDecoder {
        self.labels.as_ref()
    }
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("dimension", &self.vectorizer.dimension())
            .field("num_classes", &self.classifier.num_classes())
            .field("num_labels", &self.labels.num_labels())
            .finish()
    }
}
