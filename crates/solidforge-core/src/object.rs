//! Modeling objects.
//!
//! An object is an immutable record of one constructed or combined solid.
//! Derived objects remember their operand *names* only; there is no
//! dependency graph and nothing is recomputed when an operand changes.

use crate::engine::{BooleanOp, GeometryHandle};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Box construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxParams {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub centered: bool,
}

/// Cylinder construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CylinderParams {
    pub radius: f64,
    pub height: f64,
    pub centered: bool,
}

/// What an object is and the parameters it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Box(BoxParams),
    Cylinder(CylinderParams),
    Boolean {
        operation: BooleanOp,
        target: String,
        tool: String,
    },
    Script {
        script: String,
    },
}

impl ObjectKind {
    /// Prefix used for generated default names.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Cylinder(_) => "cylinder",
            Self::Boolean { .. } => "boolean",
            Self::Script { .. } => "script",
        }
    }

    /// Names of other objects this one was derived from.
    pub fn operands(&self) -> Vec<&str> {
        match self {
            Self::Boolean { target, tool, .. } => vec![target.as_str(), tool.as_str()],
            _ => Vec::new(),
        }
    }
}

/// A named solid inside a workspace
#[derive(Debug, Clone)]
pub struct ModelingObject {
    name: String,
    kind: ObjectKind,
    geometry: GeometryHandle,
    created: DateTime<Utc>,
}

impl ModelingObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind, geometry: GeometryHandle) -> Self {
        Self {
            name: name.into(),
            kind,
            geometry,
            created: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn geometry(&self) -> &GeometryHandle {
        &self.geometry
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
