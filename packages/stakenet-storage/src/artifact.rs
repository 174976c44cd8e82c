//! Binary graph artifact cache
//!
//! One bincode-encoded file per (organization, package) pair under a
//! caller-supplied directory. A missing artifact on load is a
//! not-found error, never an empty graph.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use stakenet_core::GraphData;

use crate::error::{Result, StorageError};

/// File name for one (organization, package) pair
///
/// Spaces are replaced with hyphens; the `.bin` extension denotes the
/// bincode-encoded edge-list format.
pub fn artifact_name(organization: &str, package: &str) -> String {
    format!(
        "{}-{}.bin",
        organization.replace(' ', "-"),
        package.replace(' ', "-")
    )
}

/// Directory of cached graph artifacts
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    dir: PathBuf,
}

impl ArtifactCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path an artifact for this pair would live at
    pub fn path_for(&self, organization: &str, package: &str) -> PathBuf {
        self.dir.join(artifact_name(organization, package))
    }

    /// Load a cached graph
    ///
    /// Fails with `ArtifactNotFound` if no artifact exists for the
    /// pair; decode failures surface as serialization errors.
    pub fn load(&self, organization: &str, package: &str) -> Result<GraphData> {
        let path = self.path_for(organization, package);
        if !path.exists() {
            return Err(StorageError::artifact_not_found(path.display().to_string()));
        }
        let bytes = fs::read(&path)?;
        let data = bincode::deserialize(&bytes)?;
        debug!(path = %path.display(), "loaded graph artifact");
        Ok(data)
    }

    /// Write (or overwrite) the artifact for this pair
    pub fn store(&self, organization: &str, package: &str, data: &GraphData) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(organization, package);
        fs::write(&path, bincode::serialize(data)?)?;
        debug!(path = %path.display(), "wrote graph artifact");
        Ok(path)
    }
}

/// Encode a graph for the `stakeholder_networks` blob column
pub fn encode_graph(data: &GraphData) -> Result<Vec<u8>> {
    Ok(bincode::serialize(data)?)
}

/// Decode a graph blob read back from the store
pub fn decode_graph(bytes: &[u8]) -> Result<GraphData> {
    Ok(bincode::deserialize(bytes)?)
}
