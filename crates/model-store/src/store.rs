//! Artifact Persistence

use crate::artifact::{ModelArtifact, ARTIFACT_FORMAT_VERSION};
use crate::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where training writes and serving reads by default
pub const DEFAULT_MODEL_PATH: &str = "models/car_price_model.bin";

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write an artifact with postcard.
///
/// The bytes go to a sibling temp file that is then renamed over `path`,
/// so a concurrent reader sees either the old or the new artifact.
pub fn save_artifact(artifact: &ModelArtifact, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let bytes = postcard::to_allocvec(artifact)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, &bytes).map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;

    info!(
        "Saved {} model artifact ({} bytes) to {}",
        artifact.model.kind(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Read an artifact, rejecting other format versions
pub fn load_artifact(path: impl AsRef<Path>) -> Result<ModelArtifact, StorageError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => io_error(path, e),
    })?;

    // The version is the leading field, so it decodes even when the rest
    // of the layout has changed.
    let (found, _) = postcard::take_from_bytes::<u32>(&bytes)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    if found != ARTIFACT_FORMAT_VERSION {
        return Err(StorageError::IncompatibleVersion {
            expected: ARTIFACT_FORMAT_VERSION,
            found,
        });
    }

    let artifact: ModelArtifact =
        postcard::from_bytes(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))?;
    debug!(
        "Loaded {} model artifact (schema {}) from {}",
        artifact.model.kind(),
        artifact.schema.name,
        path.display()
    );
    Ok(artifact)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
