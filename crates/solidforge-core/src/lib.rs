//! # SolidForge Core
//!
//! Core types, traits, and the workspace model for SolidForge.
//! Provides the error taxonomy, the opaque geometry-engine seam, the
//! engine-neutral triangle mesh, and the workspace/object bookkeeping that
//! every modeling request runs against.

pub mod engine;
pub mod error;
pub mod formats;
pub mod mesh;
pub mod object;
pub mod registry;
pub mod workspace;

pub use engine::{
    ensure_finite, ensure_positive, BooleanOp, GeometryEngine, GeometryHandle, ShapeBuilder,
};
pub use error::{EntityKind, ModelingError, Result};
pub use formats::{ExportFormat, ExportSettings};
pub use mesh::{Mesh3D, Triangle3D};
pub use object::{BoxParams, CylinderParams, ModelingObject, ObjectKind};
pub use registry::{WorkspaceRegistry, DEFAULT_WORKSPACE};
pub use workspace::{Workspace, WorkspaceInfo};
