//! Shared fixtures: a small trained-tool set written through the real
//! artifact format.

use std::path::Path;
use textcat_core::ArtifactKind;
use textcat_model::{
    write_artifact, ArtifactPaths, IndexLabelDecoder, LinearClassifier, TfidfVectorizer,
};

/// Normalized training documents and their labels
pub const CORPUS: &[(&str, &str)] = &[
    ("free offer win money", "spam"),
    ("win free prize today", "spam"),
    ("meeting schedule tomorrow", "ham"),
    ("project meeting note", "ham"),
];

const SPAM_TERMS: &[&str] = &["free", "offer", "win", "money", "prize", "today"];
const HAM_TERMS: &[&str] = &["meeting", "schedule", "tomorrow", "project", "note"];

/// Fit the three tools over the fixture corpus.
///
/// Labels sort to `["ham", "spam"]`, so class 0 is ham and class 1 spam.
/// Classifier weights are set directly instead of trained: each class row
/// fires on its own term group.
pub fn fixture_tools() -> (LinearClassifier, TfidfVectorizer, IndexLabelDecoder) {
    let documents: Vec<&str> = CORPUS.iter().map(|(doc, _)| *doc).collect();
    let labels: Vec<&str> = CORPUS.iter().map(|(_, label)| *label).collect();

    let vectorizer = TfidfVectorizer::fit(&documents);
    let decoder = IndexLabelDecoder::fit(&labels);

    let dimension = vectorizer.vocabulary_size();
    let mut ham_row = vec![0.0f32; dimension];
    let mut spam_row = vec![0.0f32; dimension];
    for term in HAM_TERMS {
        ham_row[vectorizer.vocabulary_index(term).unwrap()] = 3.0;
    }
    for term in SPAM_TERMS {
        spam_row[vectorizer.vocabulary_index(term).unwrap()] = 3.0;
    }

    let classifier = LinearClassifier::new(vec![ham_row, spam_row], vec![0.0, 0.0]);
    (classifier, vectorizer, decoder)
}

/// Write the fixture tools into `dir` and return their paths
pub fn write_fixture_artifacts(dir: impl AsRef<Path>) -> ArtifactPaths {
    let paths = ArtifactPaths::in_dir(dir);
    let (classifier, vectorizer, decoder) = fixture_tools();

    write_artifact(&paths.classifier, ArtifactKind::Classifier, &classifier).unwrap();
    write_artifact(&paths.vectorizer, ArtifactKind::Vectorizer, &vectorizer).unwrap();
    write_artifact(&paths.labels, ArtifactKind::LabelDecoder, &decoder).unwrap();

    paths
}
