//! Geometry backends.
//!
//! The backend is chosen from configuration at startup and never swapped at
//! runtime. Both backends tessellate into [`Mesh3D`] and share the same
//! writers, so artifacts look alike whichever engine produced them.

pub mod csg;
pub mod fake;

pub use csg::CsgEngine;
pub use fake::FakeEngine;

use crate::io::{write_step, write_stl};
use solidforge_core::{ExportFormat, ExportSettings, GeometryEngine, Mesh3D, Result};
use solidforge_settings::{EngineBackend, EngineSettings};
use std::path::Path;
use tracing::info;

/// Construct the configured backend.
pub fn engine_from_settings(settings: &EngineSettings) -> Box<dyn GeometryEngine> {
    info!("Geometry backend: {}", settings.backend);
    match settings.backend {
        EngineBackend::Csg => Box::new(CsgEngine::new(settings.cylinder_segments)),
        EngineBackend::Fake => Box::new(FakeEngine::new()),
    }
}

/// Serialize a tessellated solid in the requested format.
pub(crate) fn write_mesh(
    mesh: &Mesh3D,
    format: ExportFormat,
    settings: &ExportSettings,
    path: &Path,
) -> Result<()> {
    match format {
        ExportFormat::Stl => write_stl(mesh, path),
        ExportFormat::Step | ExportFormat::Stp => write_step(mesh, settings, path),
    }
}
