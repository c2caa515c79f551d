//! Workspaces and their object stores.

use crate::engine::GeometryHandle;
use crate::error::{EntityKind, ModelingError, Result};
use crate::object::ModelingObject;
use serde::Serialize;
use std::collections::HashMap;

/// An isolated namespace of modeling objects with one current-object pointer.
///
/// The current object, when set, always names an entry in the store: only
/// [`Workspace::register`] moves it, and nothing removes objects.
#[derive(Debug, Clone)]
pub struct Workspace {
    name: String,
    objects: Vec<ModelingObject>,
    index: HashMap<String, usize>,
    current: Option<String>,
    assembly: GeometryHandle,
}

/// Snapshot of a workspace for callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceInfo {
    pub workspace_id: String,
    pub object_count: usize,
    pub objects: Vec<String>,
    pub current_object: Option<String>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, assembly: GeometryHandle) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            index: HashMap::new(),
            current: None,
            assembly,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Engine-owned assembly handle for this workspace.
    pub fn assembly(&self) -> &GeometryHandle {
        &self.assembly
    }

    /// `{prefix}_{count}` where count is the number of stored objects.
    pub fn next_default_name(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.objects.len())
    }

    /// Insert or overwrite by name, then make it the current object.
    pub fn register(&mut self, object: ModelingObject) {
        let name = object.name().to_string();
        match self.index.get(&name).copied() {
            Some(slot) => {
                tracing::debug!("Overwriting object '{}' in workspace '{}'", name, self.name);
                self.objects[slot] = object;
            }
            None => {
                self.index.insert(name.clone(), self.objects.len());
                self.objects.push(object);
            }
        }
        self.current = Some(name);
    }

    pub fn lookup(&self, name: &str) -> Result<&ModelingObject> {
        self.index
            .get(name)
            .map(|&slot| &self.objects[slot])
            .ok_or_else(|| ModelingError::not_found(EntityKind::Object, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn current(&self) -> Option<&ModelingObject> {
        self.current
            .as_deref()
            .and_then(|name| self.index.get(name))
            .map(|&slot| &self.objects[slot])
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Object names in creation order.
    pub fn object_names(&self) -> Vec<String> {
        self.objects.iter().map(|o| o.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn info(&self) -> WorkspaceInfo {
        WorkspaceInfo {
            workspace_id: self.name.clone(),
            object_count: self.len(),
            objects: self.object_names(),
            current_object: self.current.clone(),
        }
    }
}
