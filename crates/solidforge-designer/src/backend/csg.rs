//! Mesh CSG backend over `csgrs`.
//!
//! Solids are `csgrs` polygon meshes. Boxes are centered on all three axes
//! when `centered` is set and otherwise have a corner at the origin;
//! cylinders run along +Z and are centered on Z or stand on the XY plane.

use super::write_mesh;
use csgrs::mesh::Mesh;
use csgrs::traits::CSG;
use nalgebra::Point3;
use solidforge_core::{
    ensure_finite, ensure_positive, BooleanOp, ExportFormat, ExportSettings, GeometryEngine,
    GeometryHandle,
    Mesh3D, ModelingError, Result, ShapeBuilder, Triangle3D,
};
use std::path::Path;
use tracing::debug;

const ENGINE: &str = "csg";

type Solid = Mesh<()>;

#[derive(Debug, Clone)]
pub struct CsgEngine {
    cylinder_segments: usize,
}

impl Default for CsgEngine {
    fn default() -> Self {
        Self::new(48)
    }
}

impl CsgEngine {
    pub fn new(cylinder_segments: usize) -> Self {
        Self {
            cylinder_segments: cylinder_segments.max(3),
        }
    }

    fn solid<'a>(&self, handle: &'a GeometryHandle) -> Result<&'a Solid> {
        handle.expect_ref::<Solid>(ENGINE)
    }

    fn wrap(solid: Solid) -> GeometryHandle {
        GeometryHandle::new(ENGINE, solid)
    }
}

impl ShapeBuilder for CsgEngine {
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

        let solid = Solid::cuboid(width, length, height, None);
        let solid = if centered {
            solid.translate(-width / 2.0, -length / 2.0, -height / 2.0)
        } else {
            solid
        };
        Ok(Self::wrap(solid))
    }

    fn make_cylinder(&self, radius: f64, height: f64, centered: bool) -> Result<GeometryHandle> {
        ensure_positive("radius", radius)?;
        ensure_positive("height", height)?;

        let solid = Solid::cylinder(radius, height, self.cylinder_segments, None);
        let solid = if centered {
            solid.translate(0.0, 0.0, -height / 2.0)
        } else {
            solid
        };
        Ok(Self::wrap(solid))
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
            BooleanOp::Subtract => a.difference(b),
            BooleanOp::Intersect => a.intersection(b),
        };

        if result.polygons.is_empty() {
            return Err(ModelingError::geometry(format!(
                "{} produced an empty solid",
                op
            )));
        }

        debug!("{} -> {} polygons", op, result.polygons.len());
        Ok(Self::wrap(result))
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
        Ok(Self::wrap(solid.translate(dx, dy, dz)))
    }
}

impl GeometryEngine for CsgEngine {
    fn name(&self) -> &'static str {
        ENGINE
    }

    fn new_assembly(&self) -> GeometryHandle {
        Self::wrap(Solid::new())
    }

    fn tessellate(&self, shape: &GeometryHandle) -> Result<Mesh3D> {
        let solid = self.solid(shape)?;
        let mut triangles = Vec::new();

        // csgrs polygons are convex, so a fan from the first vertex is exact
        for polygon in &solid.polygons {
            let points: Vec<Point3<f64>> = polygon
                .vertices
                .iter()
                .map(|v| Point3::new(v.pos.x, v.pos.y, v.pos.z))
                .collect();

            for i in 1..points.len().saturating_sub(1) {
                triangles.push(Triangle3D::new(points[0], points[i], points[i + 1]));
            }
        }

        Ok(Mesh3D::new(triangles))
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
