//! STEP (ISO 10303-21) output.
//!
//! Solids are written as an AP214 faceted B-rep: every triangle becomes a
//! planar face bounded by a poly loop, all faces share one closed shell.
//! Vertices with identical coordinates are welded together. The export
//! tolerances only end up in the representation context.

use solidforge_core::{ExportSettings, Mesh3D, ModelingError, Result};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = "AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }";

/// Format a real the way Part 21 requires: always with a decimal point.
pub fn step_real(value: f64) -> String {
    // Fold negative zero so welded coordinates print identically
    let value = if value == 0.0 { 0.0 } else { value };
    let mut text = format!("{}", value);
    if value.is_finite() && !text.contains('.') {
        text.push('.');
    }
    text
}

/// Escape a string literal for Part 21.
fn step_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Builds one STEP exchange file in memory.
#[derive(Debug)]
pub struct StepWriter {
    name: String,
    timestamp: String,
    entities: Vec<String>,
}

impl StepWriter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            entities: Vec::new(),
        }
    }

    /// Override the header timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Append an entity and return its instance id.
    fn add(&mut self, body: impl Into<String>) -> usize {
        self.entities.push(body.into());
        self.entities.len()
    }

    fn refs(ids: &[usize]) -> String {
        let list: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
        format!("({})", list.join(","))
    }

    /// Emit the product structure, units, context and the faceted solid.
    pub fn write_solid(&mut self, mesh: &Mesh3D, settings: &ExportSettings) -> Result<()> {
        let (points, faces) = weld(mesh);
        if points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ModelingError::geometry(
                "cannot write non-finite coordinates as STEP",
            ));
        }
        if faces.is_empty() {
            return Err(ModelingError::geometry("cannot write an empty solid as STEP"));
        }

        let name = step_string(&self.name);

        let app = self.add("APPLICATION_CONTEXT('automotive design')");
        self.add(format!(
            "APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,#{})",
            app
        ));
        let product_ctx = self.add(format!("PRODUCT_CONTEXT('',#{},'mechanical')", app));
        let product = self.add(format!("PRODUCT({0},{0},'',(#{1}))", name, product_ctx));
        let formation = self.add(format!("PRODUCT_DEFINITION_FORMATION('','',#{})", product));
        let def_ctx = self.add(format!(
            "PRODUCT_DEFINITION_CONTEXT('part definition',#{},'design')",
            app
        ));
        let definition = self.add(format!(
            "PRODUCT_DEFINITION('design','',#{},#{})",
            formation, def_ctx
        ));
        let shape = self.add(format!("PRODUCT_DEFINITION_SHAPE('','',#{})", definition));

        let length = self.add("(LENGTH_UNIT() NAMED_UNIT(*) SI_UNIT(.MILLI.,.METRE.))");
        let angle = self.add("(NAMED_UNIT(*) PLANE_ANGLE_UNIT() SI_UNIT($,.RADIAN.))");
        let solid_angle = self.add("(NAMED_UNIT(*) SI_UNIT($,.STERADIAN.) SOLID_ANGLE_UNIT())");
        let length_uncertainty = self.add(format!(
            "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE({}),#{},'distance_accuracy_value','confusion accuracy')",
            step_real(settings.tolerance),
            length
        ));
        let angle_uncertainty = self.add(format!(
            "UNCERTAINTY_MEASURE_WITH_UNIT(PLANE_ANGLE_MEASURE({}),#{},'angle_accuracy_value','angular accuracy')",
            step_real(settings.angular_tolerance.to_radians()),
            angle
        ));
        let context = self.add(format!(
            "(GEOMETRIC_REPRESENTATION_CONTEXT(3) GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT({}) \
             GLOBAL_UNIT_ASSIGNED_CONTEXT({}) REPRESENTATION_CONTEXT('Context #1','3D Context with UNIT and UNCERTAINTY'))",
            Self::refs(&[length_uncertainty, angle_uncertainty]),
            Self::refs(&[length, angle, solid_angle])
        ));

        let point_ids: Vec<usize> = points
            .iter()
            .map(|[x, y, z]| {
                self.add(format!(
                    "CARTESIAN_POINT('',({},{},{}))",
                    step_real(*x),
                    step_real(*y),
                    step_real(*z)
                ))
            })
            .collect();

        let mut face_ids = Vec::with_capacity(faces.len());
        for [a, b, c] in &faces {
            let poly = self.add(format!(
                "POLY_LOOP('',{})",
                Self::refs(&[point_ids[*a], point_ids[*b], point_ids[*c]])
            ));
            let bound = self.add(format!("FACE_OUTER_BOUND('',#{},.T.)", poly));
            face_ids.push(self.add(format!("FACE('',(#{}))", bound)));
        }

        let shell = self.add(format!("CLOSED_SHELL('',{})", Self::refs(&face_ids)));
        let brep = self.add(format!("FACETED_BREP({},#{})", name, shell));
        let representation = self.add(format!(
            "FACETED_BREP_SHAPE_REPRESENTATION({},(#{}),#{})",
            name, brep, context
        ));
        self.add(format!(
            "SHAPE_DEFINITION_REPRESENTATION(#{},#{})",
            shape, representation
        ));

        debug!(
            "STEP solid '{}': {} points, {} faces",
            self.name,
            point_ids.len(),
            face_ids.len()
        );
        Ok(())
    }

    /// Render the complete exchange file.
    pub fn finish(&self) -> String {
        let mut out = String::new();
        let file_name = step_string(&format!("{}.step", self.name));
        let _ = writeln!(out, "ISO-10303-21;");
        let _ = writeln!(out, "HEADER;");
        let _ = writeln!(out, "FILE_DESCRIPTION(('SolidForge faceted model'),'2;1');");
        let _ = writeln!(
            out,
            "FILE_NAME({},'{}',(''),(''),'solidforge {}','solidforge','');",
            file_name,
            self.timestamp,
            env!("CARGO_PKG_VERSION")
        );
        let _ = writeln!(out, "FILE_SCHEMA(('{}'));", SCHEMA);
        let _ = writeln!(out, "ENDSEC;");
        let _ = writeln!(out, "DATA;");
        for (index, entity) in self.entities.iter().enumerate() {
            let _ = writeln!(out, "#{}={};", index + 1, entity);
        }
        let _ = writeln!(out, "ENDSEC;");
        let _ = writeln!(out, "END-ISO-10303-21;");
        out
    }
}

/// Key a coordinate by its exact bits, folding negative zero.
fn coordinate_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Merge identical vertices and drop triangles that collapse.
fn weld(mesh: &Mesh3D) -> (Vec<[f64; 3]>, Vec<[usize; 3]>) {
    let mut lookup: HashMap<[u64; 3], usize> = HashMap::new();
    let mut points: Vec<[f64; 3]> = Vec::new();
    let mut faces = Vec::with_capacity(mesh.triangles.len());

    for tri in &mesh.triangles {
        let mut ids = [0usize; 3];
        for (slot, vertex) in tri.vertices.iter().enumerate() {
            let key = [
                coordinate_key(vertex.x),
                coordinate_key(vertex.y),
                coordinate_key(vertex.z),
            ];
            ids[slot] = *lookup.entry(key).or_insert_with(|| {
                points.push([vertex.x, vertex.y, vertex.z]);
                points.len() - 1
            });
        }

        if ids[0] != ids[1] && ids[1] != ids[2] && ids[0] != ids[2] {
            faces.push(ids);
        }
    }

    (points, faces)
}

/// Write `mesh` to `path` as a STEP faceted solid named after the file stem.
pub fn write_step(mesh: &Mesh3D, settings: &ExportSettings, path: &Path) -> Result<()> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "solid".to_string());

    let mut writer = StepWriter::new(name);
    writer.write_solid(mesh, settings)?;
    std::fs::write(path, writer.finish())?;
    Ok(())
}
