//! Workspace registry.
//!
//! Owns every workspace and tracks which one is active. A workspace named
//! [`DEFAULT_WORKSPACE`] exists from construction, so there is always an
//! active workspace.

use crate::engine::GeometryHandle;
use crate::error::{EntityKind, ModelingError, Result};
use crate::workspace::Workspace;
use std::collections::BTreeMap;
use tracing::info;

/// Name of the workspace created at startup.
pub const DEFAULT_WORKSPACE: &str = "default";

/// The set of named workspaces plus the active-workspace pointer
#[derive(Debug, Clone)]
pub struct WorkspaceRegistry {
    workspaces: BTreeMap<String, Workspace>,
    active: String,
}

impl WorkspaceRegistry {
    /// Creates a registry holding only the default workspace, which is active.
    pub fn new(default_assembly: GeometryHandle) -> Self {
        let mut workspaces = BTreeMap::new();
        workspaces.insert(
            DEFAULT_WORKSPACE.to_string(),
            Workspace::new(DEFAULT_WORKSPACE, default_assembly),
        );
        Self {
            workspaces,
            active: DEFAULT_WORKSPACE.to_string(),
        }
    }

    /// Registers an empty workspace and makes it active.
    pub fn create(&mut self, name: &str, assembly: GeometryHandle) -> Result<&Workspace> {
        if self.workspaces.contains_key(name) {
            return Err(ModelingError::AlreadyExists {
                name: name.to_string(),
            });
        }

        info!("Created workspace: {}", name);
        self.workspaces
            .insert(name.to_string(), Workspace::new(name, assembly));
        self.active = name.to_string();
        Ok(self.active())
    }

    /// Makes an existing workspace active. The active workspace is unchanged on failure.
    pub fn switch(&mut self, name: &str) -> Result<&Workspace> {
        if !self.workspaces.contains_key(name) {
            return Err(ModelingError::not_found(EntityKind::Workspace, name));
        }

        info!("Switched to workspace: {}", name);
        self.active = name.to_string();
        Ok(self.active())
    }

    pub fn active(&self) -> &Workspace {
        // The active name is only ever set to a registered key.
        &self.workspaces[&self.active]
    }

    pub fn active_mut(&mut self) -> &mut Workspace {
        self.workspaces
            .get_mut(&self.active)
            .expect("active workspace is always registered")
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workspaces.contains_key(name)
    }

    /// Workspace names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.workspaces.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}
