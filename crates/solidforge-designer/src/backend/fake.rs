//! Deterministic bounding-box backend.
//!
//! Every solid is an axis-aligned box. Results are exact and reproducible,
//! which makes this backend the one the test suites run against.

use super::write_mesh;
use nalgebra::{Point3, Vector3};
use solidforge_core::{
    ensure_finite, ensure_positive, BooleanOp, ExportFormat, ExportSettings, GeometryEngine,
    GeometryHandle,
    Mesh3D, ModelingError, Result, ShapeBuilder,
};
use std::path::Path;

const ENGINE: &str = "fake";

/// An axis-aligned solid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeSolid {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl FakeSolid {
    fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box of the given size, centered on the origin or with its corner there.
    fn sized(size: Vector3<f64>, offset: Vector3<f64>) -> Self {
        let min = Point3::origin() + offset;
        Self::new(min, min + size)
    }

    fn union(&self, other: &Self) -> Self {
        Self::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    fn overlap(&self, other: &Self) -> Option<Self> {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        (min.x < max.x && min.y < max.y && min.z < max.z).then(|| Self::new(min, max))
    }

    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

/// Per-workspace assembly marker
#[derive(Debug, Default)]
pub struct FakeAssembly;

#[derive(Debug, Default)]
pub struct FakeEngine;

impl FakeEngine {
    pub fn new() -> Self {
        Self
    }

    fn solid<'a>(&self, handle: &'a GeometryHandle) -> Result<&'a FakeSolid> {
        handle.expect_ref::<FakeSolid>(ENGINE)
    }
}

impl ShapeBuilder for FakeEngine {
    fn make_box(
        &self,
        width: f64,
        length: f64,
        height: f64,
        centered: bool,
    ) -> Result<GeometryHandle> {
        ensure_positive("width", width)?;
        ensure_positive("length", length)?;
        ensure_positive("height", height)?;

        let size = Vector3::new(width, length, height);
        let offset = if centered { -size / 2.0 } else { Vector3::zeros() };
        Ok(GeometryHandle::new(ENGINE, FakeSolid::sized(size, offset)))
    }

    fn make_cylinder(&self, radius: f64, height: f64, centered: bool) -> Result<GeometryHandle> {
        ensure_positive("radius", radius)?;
        ensure_positive("height", height)?;

        let size = Vector3::new(2.0 * radius, 2.0 * radius, height);
        let z = if centered { -height / 2.0 } else { 0.0 };
        let offset = Vector3::new(-radius, -radius, z);
        Ok(GeometryHandle::new(ENGINE, FakeSolid::sized(size, offset)))
    }

    fn combine(
        &self,
        op: BooleanOp,
        target: &GeometryHandle,
        tool: &GeometryHandle,
    ) -> Result<GeometryHandle> {
        let a = self.solid(target)?;
        let b = self.solid(tool)?;

        let result = match op {
            BooleanOp::Union => a.union(b),
            // Bounds of a difference never exceed the target's
            BooleanOp::Subtract => *a,
            BooleanOp::Intersect => a
                .overlap(b)
                .ok_or_else(|| ModelingError::geometry("intersection of disjoint solids is empty"))?,
        };

        Ok(GeometryHandle::new(ENGINE, result))
    }

    fn translate(
        &self,
        shape: &GeometryHandle,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<GeometryHandle> {
        ensure_finite("x offset", dx)?;
        ensure_finite("y offset", dy)?;
        ensure_finite("z offset", dz)?;
        let solid = self.solid(shape)?;
        let offset = Vector3::new(dx, dy, dz);
        Ok(GeometryHandle::new(
            ENGINE,
            FakeSolid::new(solid.min + offset, solid.max + offset),
        ))
    }
}

impl GeometryEngine for FakeEngine {
    fn name(&self) -> &'static str {
        ENGINE
    }

    fn new_assembly(&self) -> GeometryHandle {
        GeometryHandle::new(ENGINE, FakeAssembly)
    }

    fn tessellate(&self, shape: &GeometryHandle) -> Result<Mesh3D> {
        let solid = self.solid(shape)?;
        Ok(Mesh3D::cuboid(solid.min, solid.max))
    }

    fn export(
        &self,
        shape: &GeometryHandle,
        format: ExportFormat,
        settings: &ExportSettings,
        path: &Path,
    ) -> Result<()> {
        let mesh = self.tessellate(shape)?;
        write_mesh(&mesh, format, settings, path)
    }
}
