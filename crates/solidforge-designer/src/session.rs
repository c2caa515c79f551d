//! Modeling session.
//!
//! A [`Session`] is the explicit owner of everything a request touches: the
//! workspace registry, the geometry engine, and the artifact directory. The
//! request layer holds exactly one and passes it to every operation.

use crate::artifacts::ArtifactStore;
use crate::backend::engine_from_settings;
use solidforge_core::{ExportSettings, GeometryEngine, Result, Workspace, WorkspaceRegistry};
use solidforge_settings::{Config, RenderSettings};

pub struct Session {
    pub(crate) registry: WorkspaceRegistry,
    pub(crate) engine: Box<dyn GeometryEngine>,
    pub(crate) artifacts: ArtifactStore,
    pub(crate) step_settings: ExportSettings,
    pub(crate) render: RenderSettings,
}

impl Session {
    /// Session with default precision and render settings.
    pub fn new(engine: Box<dyn GeometryEngine>, artifacts: ArtifactStore) -> Self {
        let registry = WorkspaceRegistry::new(engine.new_assembly());
        Self {
            registry,
            engine,
            artifacts,
            step_settings: ExportSettings::STEP_DEFAULT,
            render: RenderSettings::default(),
        }
    }

    /// Build the configured backend and artifact directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let engine = engine_from_settings(&config.engine);
        let artifacts = match &config.export.output_dir {
            Some(dir) => ArtifactStore::at(dir)?,
            None => ArtifactStore::scratch()?,
        };

        Ok(Self::new(engine, artifacts)
            .with_step_settings(ExportSettings {
                tolerance: config.export.step_tolerance,
                angular_tolerance: config.export.step_angular_tolerance,
            })
            .with_render_settings(config.render.clone()))
    }

    pub fn with_step_settings(mut self, settings: ExportSettings) -> Self {
        self.step_settings = settings;
        self
    }

    pub fn with_render_settings(mut self, settings: RenderSettings) -> Self {
        self.render = settings;
        self
    }

    pub fn registry(&self) -> &WorkspaceRegistry {
        &self.registry
    }

    /// The active workspace.
    pub fn workspace(&self) -> &Workspace {
        self.registry.active()
    }

    pub fn engine(&self) -> &dyn GeometryEngine {
        self.engine.as_ref()
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn step_settings(&self) -> &ExportSettings {
        &self.step_settings
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine.name())
            .field("active_workspace", &self.registry.active_name())
            .field("artifacts", &self.artifacts.dir())
            .finish()
    }
}
