//! Export pipeline.
//!
//! STL exports are written as-is. STEP-family exports use the session's
//! high-precision settings, can be validated after writing, and always come
//! with a companion STL preview.

use crate::artifacts::ArtifactFiles;
use crate::modeling::ObjectReport;
use crate::session::Session;
use solidforge_core::{ExportFormat, ExportSettings, GeometryHandle, ModelingError, Result};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// First-line signature of a Part 21 exchange file.
pub const STEP_SIGNATURE: &str = "ISO-10303";

/// Check that `path` exists, is non-empty, and starts with the STEP signature.
pub fn validate_step_file(path: &Path) -> Result<()> {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        return Err(ModelingError::validation(
            "Exported file is empty or wasn't created properly",
        ));
    }

    let file = std::fs::File::open(path).map_err(|e| {
        ModelingError::validation(format!("Exported file validation failed: {}", e))
    })?;
    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(|e| ModelingError::validation(format!("Exported file validation failed: {}", e)))?;

    if !first_line.trim_start().starts_with(STEP_SIGNATURE) {
        return Err(ModelingError::validation(
            "Exported file does not appear to be a valid STEP file",
        ));
    }

    Ok(())
}

impl Session {
    fn geometry_of(&self, name: &str) -> Result<GeometryHandle> {
        Ok(self.workspace().lookup(name)?.geometry().clone())
    }

    /// Best-effort STL preview; a failure is logged and leaves `files` empty.
    pub(crate) fn export_preview(&self, name: &str, geometry: &GeometryHandle) -> ArtifactFiles {
        let mut files = ArtifactFiles::new();
        let path = self.artifacts.path_for(name, ExportFormat::Stl.extension());

        match self
            .engine
            .export(geometry, ExportFormat::Stl, &ExportSettings::PREVIEW, &path)
        {
            Ok(()) => {
                debug!("Preview for '{}' at {}", name, path.display());
                files.insert(ExportFormat::Stl.extension().to_string(), path);
            }
            Err(e) => warn!("Preview export failed for '{}': {}", name, e),
        }

        files
    }

    /// Export an object to `{name}.{format}` in the artifact directory.
    pub fn export_object(&self, name: &str, format: &str, validate: bool) -> Result<ObjectReport> {
        let geometry = self.geometry_of(name)?;
        let format = ExportFormat::parse(format)?;
        let path = self.artifacts.path_for(name, format.extension());

        let mut files = ArtifactFiles::new();
        if format.is_step_family() {
            self.engine
                .export(&geometry, format, &self.step_settings, &path)?;
            if validate {
                validate_step_file(&path)?;
            }
            files.extend(self.export_preview(name, &geometry));
        } else {
            self.engine
                .export(&geometry, format, &ExportSettings::PREVIEW, &path)?;
        }

        info!("Exported {} to {} format", name, format);
        files.insert(format.extension().to_string(), path);
        Ok(ObjectReport::new(name, files))
    }

    /// Export as STEP to an explicit destination, or `{name}.step` when none.
    ///
    /// A destination without a `.step`/`.stp` suffix gets `.step` appended.
    /// Unlike [`Session::export_object`] the written file is not validated.
    pub fn export_step_with_path(&self, name: &str, filepath: Option<&str>) -> Result<ObjectReport> {
        let geometry = self.geometry_of(name)?;

        let path = match filepath.filter(|p| !p.trim().is_empty()) {
            Some(p) if ExportFormat::has_step_suffix(p) => PathBuf::from(p),
            Some(p) => PathBuf::from(format!("{}.step", p)),
            None => self.artifacts.path_for(name, ExportFormat::Step.extension()),
        };

        self.engine
            .export(&geometry, ExportFormat::Step, &self.step_settings, &path)?;

        let mut files = self.export_preview(name, &geometry);
        files.insert(ExportFormat::Step.extension().to_string(), path);
        info!("Exported {} as STEP file", name);
        Ok(ObjectReport::new(name, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_missing_and_empty() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing.step");
        let err = validate_step_file(&missing).unwrap_err();
        assert_eq!(err.kind_name(), "ValidationError");
        assert!(err.to_string().contains("empty or wasn't created"));

        let empty = temp.path().join("empty.step");
        std::fs::write(&empty, "").unwrap();
        assert!(validate_step_file(&empty).is_err());
    }

    #[test]
    fn test_validate_signature() {
        let temp = tempfile::tempdir().unwrap();
        let good = temp.path().join("good.step");
        std::fs::write(&good, "ISO-10303-21;\nHEADER;\n").unwrap();
        assert!(validate_step_file(&good).is_ok());

        let bad = temp.path().join("bad.step");
        std::fs::write(&bad, "solid ascii\n").unwrap();
        let err = validate_step_file(&bad).unwrap_err();
        assert!(err.to_string().contains("does not appear to be a valid STEP file"));
    }
}
