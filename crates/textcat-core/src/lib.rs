//! TextCat Core
//!
//! Shared types and error handling for the TextCat text classification
//! service. The heavier pieces (preprocessing, artifacts, lifecycle) live
//! in `textcat-model`; the HTTP surface lives in `textcat-server`.

pub mod error;
pub mod types;

pub use error::{ArtifactKind, Error, LoadError, Result};
pub use types::Prediction;
