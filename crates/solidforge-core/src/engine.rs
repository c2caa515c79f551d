//! Geometry engine seam.
//!
//! The modeling core never inspects engine internals. Engines hand out
//! [`GeometryHandle`]s and take them back; everything in between is opaque.

use crate::error::{ModelingError, Result};
use crate::formats::{ExportFormat, ExportSettings};
use crate::mesh::Mesh3D;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Opaque, cheaply cloneable handle to engine-owned geometry.
#[derive(Clone)]
pub struct GeometryHandle {
    engine: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl GeometryHandle {
    /// Wrap a value produced by the named engine.
    pub fn new<T: Any + Send + Sync>(engine: &'static str, value: T) -> Self {
        Self {
            engine,
            inner: Arc::new(value),
        }
    }

    /// Name of the engine that produced this handle.
    pub fn engine(&self) -> &'static str {
        self.engine
    }

    /// Borrow the wrapped value if it has the expected type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Borrow the wrapped value, failing with a geometry error on a foreign handle.
    pub fn expect_ref<T: Any>(&self, engine: &'static str) -> Result<&T> {
        if self.engine != engine {
            return Err(ModelingError::geometry(format!(
                "handle was produced by engine '{}', not '{}'",
                self.engine, engine
            )));
        }
        self.downcast_ref::<T>().ok_or_else(|| {
            ModelingError::geometry(format!("handle does not hold {engine} geometry"))
        })
    }
}

impl fmt::Debug for GeometryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryHandle")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Boolean combination of two solids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    /// Everything in either operand
    Union,
    /// Target minus tool
    Subtract,
    /// Only what both operands share
    Intersect,
}

impl BooleanOp {
    /// Operation name as accepted on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Subtract => "subtract",
            Self::Intersect => "intersect",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BooleanOp {
    type Err = ModelingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "union" => Ok(Self::Union),
            "subtract" => Ok(Self::Subtract),
            "intersect" => Ok(Self::Intersect),
            other => Err(ModelingError::UnsupportedOperation {
                operation: other.to_string(),
            }),
        }
    }
}

/// Primitive construction surface.
///
/// This is the whole capability set handed to user scripts; nothing else is
/// reachable from script scope.
pub trait ShapeBuilder {
    /// Build a box of the given extents.
    fn make_box(&self, width: f64, length: f64, height: f64, centered: bool)
        -> Result<GeometryHandle>;

    /// Build a Z-axis cylinder.
    fn make_cylinder(&self, radius: f64, height: f64, centered: bool) -> Result<GeometryHandle>;

    /// Combine two solids.
    fn combine(
        &self,
        op: BooleanOp,
        target: &GeometryHandle,
        tool: &GeometryHandle,
    ) -> Result<GeometryHandle>;

    /// Move a solid by the given offset.
    fn translate(&self, shape: &GeometryHandle, dx: f64, dy: f64, dz: f64)
        -> Result<GeometryHandle>;
}

/// A geometry backend: construction plus tessellation and serialization.
pub trait GeometryEngine: ShapeBuilder + Send {
    /// Short backend name, also stamped into every handle it produces.
    fn name(&self) -> &'static str;

    /// Fresh engine-specific assembly handle for a new workspace.
    fn new_assembly(&self) -> GeometryHandle;

    /// Triangulate a solid.
    fn tessellate(&self, shape: &GeometryHandle) -> Result<Mesh3D>;

    /// Write a solid to `path` in the given format.
    fn export(
        &self,
        shape: &GeometryHandle,
        format: ExportFormat,
        settings: &ExportSettings,
        path: &Path,
    ) -> Result<()>;
}

/// Reject dimensions no engine can build.
pub fn ensure_positive(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelingError::geometry(format!(
            "{label} must be a positive finite number, got {value}"
        )))
    }
}

/// Reject offsets that would push geometry to infinity.
pub fn ensure_finite(label: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelingError::geometry(format!(
            "{label} must be a finite number, got {value}"
        )))
    }
}
