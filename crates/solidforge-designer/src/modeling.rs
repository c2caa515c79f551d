//! Modeling operations.
//!
//! Every creation follows the same shape: resolve the name, let the engine
//! build the solid, register it (which makes it current), then write an STL
//! preview. Nothing is registered unless the engine succeeded.

use crate::artifacts::ArtifactFiles;
use crate::render::render_png;
use crate::script;
use crate::session::Session;
use serde::Serialize;
use solidforge_core::{
    BooleanOp, BoxParams, CylinderParams, EntityKind, GeometryHandle, ModelingError,
    ModelingObject, ObjectKind, Result, WorkspaceInfo,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Resolved construction dimensions echoed back to callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dimensions {
    Box { width: f64, length: f64, height: f64 },
    Cylinder { radius: f64, height: f64 },
}

/// Outcome of an operation that produced or wrote an object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectReport {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    pub files: ArtifactFiles,
}

impl ObjectReport {
    pub(crate) fn new(object_id: impl Into<String>, files: ArtifactFiles) -> Self {
        Self {
            object_id: object_id.into(),
            dimensions: None,
            files,
        }
    }

    fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Path of the artifact with the given extension, if it was written.
    pub fn file(&self, extension: &str) -> Option<&PathBuf> {
        self.files.get(extension)
    }
}

/// Active workspace snapshot plus the artifact directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceReport {
    #[serde(flatten)]
    pub info: WorkspaceInfo,
    pub temp_directory: PathBuf,
}

/// All registered workspaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceList {
    pub workspaces: Vec<String>,
    pub active: String,
}

impl Session {
    pub fn create_workspace(&mut self, name: &str) -> Result<String> {
        let assembly = self.engine.new_assembly();
        let workspace = self.registry.create(name, assembly)?;
        Ok(workspace.name().to_string())
    }

    pub fn switch_workspace(&mut self, name: &str) -> Result<String> {
        let workspace = self.registry.switch(name)?;
        Ok(workspace.name().to_string())
    }

    pub fn workspace_report(&self) -> WorkspaceReport {
        WorkspaceReport {
            info: self.workspace().info(),
            temp_directory: self.artifacts.dir().to_path_buf(),
        }
    }

    pub fn list_workspaces(&self) -> WorkspaceList {
        WorkspaceList {
            workspaces: self.registry.names(),
            active: self.registry.active_name().to_string(),
        }
    }

    /// Explicit name, or `{prefix}_{count}` in the active workspace.
    pub fn resolve_name(&self, name: Option<&str>, prefix: &str) -> String {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.workspace().next_default_name(prefix),
        }
    }

    fn register(&mut self, name: &str, kind: ObjectKind, geometry: GeometryHandle) -> ArtifactFiles {
        debug!("Registering {} '{}'", kind.prefix(), name);
        self.registry
            .active_mut()
            .register(ModelingObject::new(name, kind, geometry.clone()));
        self.export_preview(name, &geometry)
    }

    pub fn create_box(
        &mut self,
        width: f64,
        length: f64,
        height: f64,
        centered: bool,
        name: Option<&str>,
    ) -> Result<ObjectReport> {
        let name = self.resolve_name(name, "box");
        let geometry = self.engine.make_box(width, length, height, centered)?;
        let kind = ObjectKind::Box(BoxParams {
            width,
            length,
            height,
            centered,
        });

        let files = self.register(&name, kind, geometry);
        info!("Created box: {}", name);
        Ok(ObjectReport::new(name, files).with_dimensions(Dimensions::Box {
            width,
            length,
            height,
        }))
    }

    pub fn create_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        centered: bool,
        name: Option<&str>,
    ) -> Result<ObjectReport> {
        let name = self.resolve_name(name, "cylinder");
        let geometry = self.engine.make_cylinder(radius, height, centered)?;
        let kind = ObjectKind::Cylinder(CylinderParams {
            radius,
            height,
            centered,
        });

        let files = self.register(&name, kind, geometry);
        info!("Created cylinder: {}", name);
        Ok(ObjectReport::new(name, files).with_dimensions(Dimensions::Cylinder { radius, height }))
    }

    /// Combine two objects of the active workspace.
    ///
    /// Operands are checked before the operation name, so an unknown operand
    /// reports `NotFound` even when the operation is also invalid.
    pub fn boolean_operation(
        &mut self,
        operation: &str,
        target: &str,
        tool: &str,
        name: Option<&str>,
    ) -> Result<ObjectReport> {
        let workspace = self.workspace();
        let target_geometry = workspace
            .lookup(target)
            .map_err(|_| ModelingError::not_found(EntityKind::Target, target))?
            .geometry()
            .clone();
        let tool_geometry = workspace
            .lookup(tool)
            .map_err(|_| ModelingError::not_found(EntityKind::Tool, tool))?
            .geometry()
            .clone();

        let name = self.resolve_name(name, "boolean");
        let op: BooleanOp = operation.parse()?;
        let geometry = self.engine.combine(op, &target_geometry, &tool_geometry)?;

        let kind = ObjectKind::Boolean {
            operation: op,
            target: target.to_string(),
            tool: tool.to_string(),
        };
        let files = self.register(&name, kind, geometry);
        info!("Created {} between {} and {}", op, target, tool);
        Ok(ObjectReport::new(name, files))
    }

    /// Evaluate a modeling script with the engine as its only capability.
    pub fn execute_script(&mut self, source: &str, name: Option<&str>) -> Result<ObjectReport> {
        let name = self.resolve_name(name, "script");
        let geometry = script::evaluate(source, self.engine.as_ref())?;

        let kind = ObjectKind::Script {
            script: source.to_string(),
        };
        let files = self.register(&name, kind, geometry);
        info!("Created object from script: {}", name);
        Ok(ObjectReport::new(name, files))
    }

    /// Render the current object to `{name}.png`.
    pub fn render_current(&self) -> Result<ObjectReport> {
        let object = self
            .workspace()
            .current()
            .ok_or(ModelingError::NoCurrentObject)?;

        let mesh = self.engine.tessellate(object.geometry())?;
        let path = self.artifacts.path_for(object.name(), "png");
        render_png(&mesh, self.render.width, self.render.height, &path)?;

        info!("Rendered {}", object.name());
        let mut files = ArtifactFiles::new();
        files.insert("png".to_string(), path);
        Ok(ObjectReport::new(object.name(), files))
    }
}
