//! Tool dispatch and the MCP-style stdio protocol.
//!
//! [`ToolServer`] owns the modeling [`Session`] and the [`EditorBridge`]
//! behind one coarse lock. Each request takes the lock once and holds it
//! until the response is built, so requests never interleave.

pub mod mcp;
pub mod tools;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use solidforge_communication::{EditorBridge, StopOutcome};
use solidforge_core::{ModelingError, Result};
use solidforge_designer::Session;
use solidforge_settings::Config;
use tracing::{info, warn};

pub use tools::tool_definitions;

/// Everything a tool call may touch
#[derive(Debug)]
pub struct ServerState {
    pub session: Session,
    pub bridge: EditorBridge,
}

/// Tagged result of every tool call
///
/// Failures never escape as transport errors; they become `status: "error"`
/// with the failure's stable kind tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub status: ToolStatus,
    pub message: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

impl ToolResponse {
    /// Success carrying the fields of `payload` alongside status and message.
    pub fn success(message: impl Into<String>, payload: &impl Serialize) -> Self {
        let payload = match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Map::new(),
            Ok(other) => {
                let mut map = Map::new();
                map.insert("result".to_string(), other);
                map
            }
            Err(e) => return Self::failure(&ModelingError::Io(e.into())),
        };

        Self {
            status: ToolStatus::Success,
            message: message.into(),
            payload,
            error_kind: None,
        }
    }

    pub fn failure(error: &ModelingError) -> Self {
        Self {
            status: ToolStatus::Error,
            message: error.to_string(),
            payload: Map::new(),
            error_kind: Some(error.kind_name().to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

#[derive(Debug)]
pub struct ToolServer {
    state: Mutex<ServerState>,
}

impl ToolServer {
    pub fn new(session: Session, bridge: EditorBridge) -> Self {
        Self {
            state: Mutex::new(ServerState { session, bridge }),
        }
    }

    /// Build the session and the editor bridge described by `config`.
    ///
    /// The bridge shares the artifact directory, so the editor sees the same
    /// files the export pipeline writes.
    pub fn from_config(config: &Config) -> Result<Self> {
        let session = Session::from_config(config)?;
        let bridge = EditorBridge::new(session.artifacts().dir(), config.editor.clone())?;

        info!(
            "Tool server ready (engine: {}, artifacts: {})",
            session.engine().name(),
            session.artifacts().dir().display()
        );
        Ok(Self::new(session, bridge))
    }

    /// Run `f` with exclusive access to the shared state.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut ServerState) -> T) -> T {
        let mut state = self.state.lock();
        f(&mut state)
    }

    /// JSON text of the active workspace, served as `workspace://current`.
    pub fn workspace_resource(&self) -> String {
        self.with_state(|state| {
            let report = state.session.workspace_report();
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        })
    }

    /// Stop a still-running editor before the process exits.
    pub fn shutdown(&self) {
        self.with_state(|state| match state.bridge.stop() {
            Ok(StopOutcome::NotRunning) => {}
            Ok(outcome) => info!("Editor stopped on shutdown ({:?})", outcome),
            Err(e) => warn!("Failed to stop editor on shutdown: {}", e),
        });
    }
}
