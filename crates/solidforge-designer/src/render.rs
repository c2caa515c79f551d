//! Preview renderer for modeling objects
//! Renders a tessellated solid to a PNG using tiny-skia.
//!
//! Features:
//! - Isometric view from the (+X, +Y, +Z) octant
//! - Back-face culling and painter's-order depth sorting
//! - Flat Lambert shading per triangle

use nalgebra::{Point3, Vector3};
use solidforge_core::{Mesh3D, ModelingError, Result};
use std::path::Path;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};
use tracing::debug;

const MARGIN: f32 = 0.1;

fn bg_color() -> Color {
    Color::from_rgba8(236, 240, 241, 255)
}

fn base_color() -> (f32, f32, f32) {
    (52.0, 152.0, 219.0)
}

/// Fixed isometric camera
struct Camera {
    toward_viewer: Vector3<f64>,
    right: Vector3<f64>,
    up: Vector3<f64>,
    light: Vector3<f64>,
}

impl Camera {
    fn isometric() -> Self {
        Self {
            toward_viewer: Vector3::new(1.0, 1.0, 1.0).normalize(),
            right: Vector3::new(-1.0, 1.0, 0.0).normalize(),
            up: Vector3::new(-1.0, -1.0, 2.0).normalize(),
            light: Vector3::new(0.3, 0.5, 1.0).normalize(),
        }
    }

    fn project(&self, p: &Point3<f64>) -> (f64, f64) {
        let v = p.coords;
        (v.dot(&self.right), v.dot(&self.up))
    }

    fn depth(&self, p: &Point3<f64>) -> f64 {
        p.coords.dot(&self.toward_viewer)
    }
}

struct Facet {
    screen: [(f32, f32); 3],
    depth: f64,
    shade: f32,
}

/// Render `mesh` into a `width` x `height` PNG at `path`.
pub fn render_png(mesh: &Mesh3D, width: u32, height: u32, path: &Path) -> Result<()> {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(ModelingError::geometry(format!(
            "invalid image size {}x{}",
            width, height
        )));
    };
    pixmap.fill(bg_color());

    let camera = Camera::isometric();
    let facets = project_facets(mesh, &camera, width as f32, height as f32);

    let (r, g, b) = base_color();
    let mut paint = Paint::default();
    paint.anti_alias = true;

    for facet in &facets {
        paint.set_color_rgba8(
            (r * facet.shade) as u8,
            (g * facet.shade) as u8,
            (b * facet.shade) as u8,
            255,
        );

        let mut pb = PathBuilder::new();
        pb.move_to(facet.screen[0].0, facet.screen[0].1);
        pb.line_to(facet.screen[1].0, facet.screen[1].1);
        pb.line_to(facet.screen[2].0, facet.screen[2].1);
        pb.close();
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    debug!("Rendered {} of {} triangles", facets.len(), mesh.len());

    pixmap
        .save_png(path)
        .map_err(|e| ModelingError::Io(std::io::Error::other(e)))
}

/// Visible triangles in screen space, farthest first.
fn project_facets(mesh: &Mesh3D, camera: &Camera, width: f32, height: f32) -> Vec<Facet> {
    if mesh.is_empty() {
        return Vec::new();
    }

    let mut min = (f64::MAX, f64::MAX);
    let mut max = (f64::MIN, f64::MIN);
    for tri in &mesh.triangles {
        for vertex in &tri.vertices {
            let (x, y) = camera.project(vertex);
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
    }

    let span_x = (max.0 - min.0).max(1e-9) as f32;
    let span_y = (max.1 - min.1).max(1e-9) as f32;
    let usable = 1.0 - 2.0 * MARGIN;
    let scale = (width * usable / span_x).min(height * usable / span_y);
    let center = (((min.0 + max.0) / 2.0) as f32, ((min.1 + max.1) / 2.0) as f32);

    let to_screen = |p: &Point3<f64>| {
        let (x, y) = camera.project(p);
        (
            width / 2.0 + (x as f32 - center.0) * scale,
            height / 2.0 - (y as f32 - center.1) * scale,
        )
    };

    let mut facets: Vec<Facet> = mesh
        .triangles
        .iter()
        .filter(|tri| tri.normal.dot(&camera.toward_viewer) > 0.0)
        .map(|tri| {
            let lambert = tri.normal.dot(&camera.light).max(0.0) as f32;
            let depth = tri.vertices.iter().map(|v| camera.depth(v)).sum::<f64>() / 3.0;
            Facet {
                screen: [
                    to_screen(&tri.vertices[0]),
                    to_screen(&tri.vertices[1]),
                    to_screen(&tri.vertices[2]),
                ],
                depth,
                shade: 0.35 + 0.65 * lambert,
            }
        })
        .collect();

    facets.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    facets
}
