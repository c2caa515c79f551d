//! Binary STL output.

use solidforge_core::{Mesh3D, ModelingError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

pub const STL_EXTENSION: &str = "stl";

fn to_stl_triangles(mesh: &Mesh3D) -> Vec<stl_io::Triangle> {
    mesh.triangles
        .iter()
        .map(|tri| {
            let [a, b, c] = tri.vertices;
            stl_io::Triangle {
                normal: stl_io::Normal::new([
                    tri.normal.x as f32,
                    tri.normal.y as f32,
                    tri.normal.z as f32,
                ]),
                vertices: [
                    stl_io::Vertex::new([a.x as f32, a.y as f32, a.z as f32]),
                    stl_io::Vertex::new([b.x as f32, b.y as f32, b.z as f32]),
                    stl_io::Vertex::new([c.x as f32, c.y as f32, c.z as f32]),
                ],
            }
        })
        .collect()
}

/// Write `mesh` as binary STL. Output depends only on the mesh.
pub fn write_stl(mesh: &Mesh3D, path: &Path) -> Result<()> {
    let triangles = to_stl_triangles(mesh);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    stl_io::write_stl(&mut writer, triangles.iter())
        .map_err(|e| ModelingError::geometry(format!("STL write failed: {}", e)))?;

    debug!("Wrote {} triangles to {}", triangles.len(), path.display());
    Ok(())
}
