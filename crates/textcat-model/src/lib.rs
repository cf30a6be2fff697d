//! TextCat Model
//!
//! The serving core: a deterministic text-preprocessing pipeline, a
//! versioned artifact format for trained classification tools, the
//! artifact lifecycle manager that governs loading and cache coherency,
//! and the prediction service that ties them together.
//!
//! The preprocessing pipeline must transform text exactly the way it was
//! transformed at training time; artifacts are loaded lazily as a single
//! atomic bundle and swapped atomically on reload.

pub mod bundle;
pub mod format;
pub mod labels;
pub mod lemmatizer;
pub mod linear;
pub mod loader;
pub mod manager;
pub mod pipeline;
pub mod service;
pub mod stopwords;
pub mod tfidf;

pub use bundle::{ArtifactBundle, ClassOutcome, ClassifierModel, LabelDecoder, Vectorizer};
pub use format::{read_artifact, write_artifact, ArtifactHeader, ARTIFACT_MAGIC, FORMAT_VERSION};
pub use labels::IndexLabelDecoder;
pub use lemmatizer::Lemmatizer;
pub use linear::LinearClassifier;
pub use loader::{ArtifactLoader, ArtifactPaths, FileArtifactLoader};
pub use manager::ArtifactManager;
pub use pipeline::{PreprocessConfig, TextPipeline};
pub use service::PredictionService;
pub use stopwords::StopwordFilter;
pub use tfidf::TfidfVectorizer;
