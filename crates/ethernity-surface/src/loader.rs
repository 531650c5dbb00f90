//! Loading of compiled contract artifacts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ethernity_core::utils::artifact_path;
use ethernity_core::{ArtifactSource, ContractArtifact, Error, Result};
use tracing::debug;

/// Reads and decodes the artifact at `path`.
pub fn read_artifact(path: &Path) -> Result<ContractArtifact> {
    debug!(path = %path.display(), "loading artifact");
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::DecodeError(format!("{}: {}", path.display(), e)))
}

/// Resolves base contracts from a compiler output directory laid out as
/// `<dir>/<Name>.sol/<Name>.json`.
#[derive(Debug, Clone)]
pub struct FsArtifactSource {
    artifacts_dir: PathBuf,
}

impl FsArtifactSource {
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self { artifacts_dir: artifacts_dir.into() }
    }
}

impl ArtifactSource for FsArtifactSource {
    fn load(&self, contract: &str) -> Result<ContractArtifact> {
        read_artifact(&artifact_path(&self.artifacts_dir, contract))
    }
}

/// In-memory artifacts keyed by contract name.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactSource {
    artifacts: HashMap<String, ContractArtifact>,
}

impl MemoryArtifactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contract: impl Into<String>, artifact: ContractArtifact) {
        self.artifacts.insert(contract.into(), artifact);
    }

    /// Decodes `value` as an artifact and registers it under `contract`.
    pub fn insert_json(
        &mut self,
        contract: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<()> {
        let artifact = serde_json::from_value(value)?;
        self.insert(contract, artifact);
        Ok(())
    }
}

impl ArtifactSource for MemoryArtifactSource {
    fn load(&self, contract: &str) -> Result<ContractArtifact> {
        self.artifacts
            .get(contract)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("artefato de {contract}")))
    }
}
