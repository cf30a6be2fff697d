//! Prediction orchestration
//!
//! Ties the preprocessing pipeline and the artifact lifecycle manager
//! together to answer a single classification request.

use crate::manager::ArtifactManager;
use crate::pipeline::TextPipeline;
use textcat_core::{Error, Prediction, Result};
use tracing::debug;

/// Answers classification requests against the currently loaded bundle.
pub struct PredictionService {
    pipeline: TextPipeline,
    manager: ArtifactManager,
}

impl PredictionService {
    pub fn new(pipeline: TextPipeline, manager: ArtifactManager) -> Self {
        Self { pipeline, manager }
    }

    /// The lifecycle manager backing this service
    pub fn manager(&self) -> &ArtifactManager {
        &self.manager
    }

    /// Classify one text string.
    ///
    /// Fails with `Error::Validation` for empty input, `Error::Load` when
    /// no bundle can be served, and `Error::Prediction` for unexpected
    /// failures inside transform/predict/decode.
    pub async fn predict(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(Error::validation("text must not be empty"));
        }

        let bundle = self.manager.ensure_loaded().await?;

        let normalized = self.pipeline.preprocess(text);
        debug!(%normalized, "preprocessed input");

        let features = bundle.vectorizer().transform(&normalized)?;
        let outcome = bundle.classifier().predict(&features)?;
        let label = bundle.labels().decode(outcome.class_id)?;

        debug!(%label, confidence = outcome.confidence, "prediction complete");
        Ok(Prediction::new(label, outcome.confidence))
    }
}
