//! Versioned on-disk artifact format
//!
//! An artifact file is a single JSON header line followed by the JSON
//! payload bytes:
//!
//! ```text
//! {"magic":"textcat-artifact","format_version":1,"kind":"vectorizer","checksum":"<sha256 hex>"}
//! {...payload...}
//! ```
//!
//! The checksum covers the payload bytes exactly as they appear in the
//! file, so a corrupted or truncated artifact fails fast instead of being
//! deserialized into a half-broken model.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use textcat_core::{ArtifactKind, LoadError, Result};

/// Magic string identifying a TextCat artifact file
pub const ARTIFACT_MAGIC: &str = "textcat-artifact";

/// Current artifact format version
pub const FORMAT_VERSION: u32 = 1;

/// Header line of an artifact file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub magic: String,
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub checksum: String,
}

/// Serialize a payload into the versioned artifact format.
///
/// Used by the offline trainer and by tests to build fixtures.
pub fn write_artifact<T: Serialize>(
    path: impl AsRef<Path>,
    kind: ArtifactKind,
    payload: &T,
) -> Result<()> {
    let payload = serde_json::to_vec(payload)?;

    let mut hasher = Sha256::new();
    hasher.update(&payload);
    let checksum = format!("{:x}", hasher.finalize());

    let header = ArtifactHeader {
        magic: ARTIFACT_MAGIC.to_string(),
        format_version: FORMAT_VERSION,
        kind,
        checksum,
    };

    let mut bytes = serde_json::to_vec(&header)?;
    bytes.push(b'\n');
    bytes.extend_from_slice(&payload);

    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read and verify an artifact file, deserializing its payload.
///
/// Verifies magic, format version, declared kind, and checksum before any
/// payload deserialization happens.
pub fn read_artifact<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    kind: ArtifactKind,
) -> std::result::Result<T, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| LoadError::deserialization(kind, format!("read failed: {e}")))?;

    let newline = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| LoadError::deserialization(kind, "missing header line"))?;

    let header: ArtifactHeader = serde_json::from_slice(&bytes[..newline])
        .map_err(|e| LoadError::deserialization(kind, format!("malformed header: {e}")))?;

    if header.magic != ARTIFACT_MAGIC {
        return Err(LoadError::deserialization(kind, "unrecognized magic"));
    }
    if header.format_version != FORMAT_VERSION {
        return Err(LoadError::deserialization(
            kind,
            format!(
                "unsupported format version {} (expected {})",
                header.format_version, FORMAT_VERSION
            ),
        ));
    }
    if header.kind != kind {
        return Err(LoadError::deserialization(
            kind,
            format!("expected {kind} artifact, found {}", header.kind),
        ));
    }

    let payload = &bytes[newline + 1..];
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let checksum = format!("{:x}", hasher.finalize());
    if checksum != header.checksum {
        return Err(LoadError::deserialization(kind, "checksum mismatch"));
    }

    serde_json::from_slice(payload)
        .map_err(|e| LoadError::deserialization(kind, format!("malformed payload: {e}")))
}
