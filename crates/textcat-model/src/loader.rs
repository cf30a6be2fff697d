//! Artifact locations and bundle loading
//!
//! Loading is all-or-nothing: every path is checked for existence first,
//! every artifact is verified and deserialized, and cross-artifact
//! consistency is checked before the bundle is constructed. A failure at
//! any step means no partial bundle ever becomes visible.

use crate::bundle::{ArtifactBundle, ClassifierModel, LabelDecoder};
use crate::format::read_artifact;
use crate::labels::IndexLabelDecoder;
use crate::linear::LinearClassifier;
use crate::tfidf::TfidfVectorizer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use textcat_core::{ArtifactKind, LoadError};

/// The three artifact file locations, resolved once at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub vectorizer: PathBuf,
    pub labels: PathBuf,
}

impl ArtifactPaths {
    /// Conventional layout: three files under one directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join("classifier.json"),
            vectorizer: dir.join("vectorizer.json"),
            labels: dir.join("labels.json"),
        }
    }

    /// Path for a given artifact kind
    pub fn path_for(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Classifier => &self.classifier,
            ArtifactKind::Vectorizer => &self.vectorizer,
            ArtifactKind::LabelDecoder => &self.labels,
        }
    }
}

/// Source of artifact bundles.
///
/// The lifecycle manager only ever sees this trait; tests inject loaders
/// that count invocations or fail on demand.
#[async_trait]
pub trait ArtifactLoader: Send + Sync {
    async fn load(&self) -> Result<ArtifactBundle, LoadError>;
}

/// Loads the bundle from three artifact files on disk
pub struct FileArtifactLoader {
    paths: ArtifactPaths,
}

impl FileArtifactLoader {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }
}

#[async_trait]
impl ArtifactLoader for FileArtifactLoader {
    async fn load(&self) -> Result<ArtifactBundle, LoadError> {
        // Existence check for all three before any deserialization, so a
        // missing file is reported as NotFound rather than a read error.
        for kind in [
            ArtifactKind::Classifier,
            ArtifactKind::Vectorizer,
            ArtifactKind::LabelDecoder,
        ] {
            let path = self.paths.path_for(kind);
            if !path.exists() {
                return Err(LoadError::NotFound {
                    kind,
                    path: path.to_path_buf(),
                });
            }
        }

        let classifier: LinearClassifier =
            read_artifact(&self.paths.classifier, ArtifactKind::Classifier)?;
        classifier
            .validate()
            .map_err(|reason| LoadError::deserialization(ArtifactKind::Classifier, reason))?;
        info!(path = %self.paths.classifier.display(), "classifier artifact loaded");

        let vectorizer: TfidfVectorizer =
            read_artifact(&self.paths.vectorizer, ArtifactKind::Vectorizer)?;
        vectorizer
            .validate()
            .map_err(|reason| LoadError::deserialization(ArtifactKind::Vectorizer, reason))?;
        info!(path = %self.paths.vectorizer.display(), "vectorizer artifact loaded");

        let labels: IndexLabelDecoder = read_artifact(&self.paths.labels, ArtifactKind::LabelDecoder)?;
        labels
            .validate()
            .map_err(|reason| LoadError::deserialization(ArtifactKind::LabelDecoder, reason))?;
        info!(path = %self.paths.labels.display(), "label-decoder artifact loaded");

        // Cross-artifact consistency: the three tools must have been
        // produced by the same training run.
        if classifier.dimension() != vectorizer.vocabulary_size() {
            return Err(LoadError::deserialization(
                ArtifactKind::Classifier,
                format!(
                    "model dimension {} does not match vectorizer vocabulary size {}",
                    classifier.dimension(),
                    vectorizer.vocabulary_size()
                ),
            ));
        }
        if labels.num_labels() != classifier.num_classes() {
            return Err(LoadError::deserialization(
                ArtifactKind::LabelDecoder,
                format!(
                    "{} labels for {} classes",
                    labels.num_labels(),
                    classifier.num_classes()
                ),
            ));
        }

        Ok(ArtifactBundle::new(
            Arc::new(classifier),
            Arc::new(vectorizer),
            Arc::new(labels),
        ))
    }
}
