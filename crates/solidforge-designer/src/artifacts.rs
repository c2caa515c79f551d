//! Artifact directory.
//!
//! Every exported or rendered file lands here as `{object}.{extension}`.
//! Nothing is ever cleaned up; the directory outlives the process.

use solidforge_core::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output files of one operation keyed by extension (`stl`, `step`, `png`, ...).
pub type ArtifactFiles = BTreeMap<String, PathBuf>;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a fresh `solidforge_*` directory under the system temp dir.
    pub fn scratch() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("solidforge_")
            .tempdir()?
            .keep();
        info!("Artifact directory: {}", dir.display());
        Ok(Self { dir })
    }

    /// Use (and create if needed) a fixed directory.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!("Artifact directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the artifact for `name` with the given extension.
    pub fn path_for(&self, name: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, extension))
    }
}
