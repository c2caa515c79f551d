//! # SolidForge Communication
//!
//! Everything that talks to the outside world: the external CAD editor
//! bridge (shared script/model files and the editor process) and the
//! JSON-RPC 2.0 types spoken over stdio.

pub mod editor;
pub mod protocol;

pub use editor::{
    find_program, CandidateStatus, EditorBridge, EditorDiagnostics, EditorProcess, StopOutcome,
    MODEL_FILE_NAME, SCRIPT_FILE_NAME,
};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
