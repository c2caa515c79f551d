//! Error handling for SolidForge
//!
//! Provides the error taxonomy shared by every layer of the modeling service:
//! - Lookup errors (unknown workspace or object names, duplicate workspaces)
//! - Caller errors (unsupported boolean operations or export formats, bad
//!   tool arguments, unknown tools)
//! - Geometry errors (engine construction, combination, and export failures)
//! - Script errors (user scripts that fail or never bind a result)
//! - Validation, I/O, and external editor process errors
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::fmt;
use thiserror::Error;

/// The kind of entity a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A named workspace
    Workspace,
    /// A modeling object inside the active workspace
    Object,
    /// The target operand of a boolean operation
    Target,
    /// The tool operand of a boolean operation
    Tool,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace => write!(f, "Workspace"),
            Self::Object => write!(f, "Object"),
            Self::Target => write!(f, "Target object"),
            Self::Tool => write!(f, "Tool object"),
        }
    }
}

/// Main error type for SolidForge
///
/// A unified error type covering every failure a modeling request can hit.
/// Boundary code converts it into an error-status payload; it never crosses
/// the transport.
#[derive(Error, Debug)]
pub enum ModelingError {
    /// A workspace or object name is unknown
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What was being looked up.
        kind: EntityKind,
        /// The name that was not found.
        name: String,
    },

    /// A workspace with this name is already registered
    #[error("Workspace '{name}' already exists")]
    AlreadyExists {
        /// The duplicate workspace name.
        name: String,
    },

    /// Boolean operation outside {union, subtract, intersect}
    #[error("Unknown boolean operation: {operation}")]
    UnsupportedOperation {
        /// The operation the caller asked for.
        operation: String,
    },

    /// Export format outside {stl, step, stp}
    #[error("Unsupported export format: {format}. Supported formats: stl, step, stp")]
    UnsupportedFormat {
        /// The format the caller asked for.
        format: String,
    },

    /// Tool arguments are missing or have the wrong type
    #[error("Invalid arguments for '{tool}': {reason}")]
    InvalidArguments {
        /// The tool being called.
        tool: String,
        /// What the decoder rejected.
        reason: String,
    },

    /// No tool is registered under this name
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// The requested tool name.
        name: String,
    },

    /// Geometry engine construction or export failure
    #[error("Geometry error: {reason}")]
    Geometry {
        /// The reason reported by the engine.
        reason: String,
    },

    /// A user script failed to lex, parse, or evaluate
    #[error("Error executing script: {reason}")]
    Script {
        /// The underlying cause, including its location.
        reason: String,
    },

    /// A user script ran but never bound `result`
    #[error("Script must define a 'result' variable containing the shape")]
    MissingResult,

    /// Post-export artifact check failed
    #[error("Export validation failed: {reason}")]
    Validation {
        /// Why the artifact was rejected.
        reason: String,
    },

    /// The operation acts on the current object but none is selected
    #[error("No current object selected")]
    NoCurrentObject,

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external editor could not be launched or stopped
    #[error("Editor process error: {reason}")]
    Process {
        /// What went wrong with the process.
        reason: String,
    },
}

impl ModelingError {
    /// Create a lookup error
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a geometry error from any displayable cause
    pub fn geometry(reason: impl fmt::Display) -> Self {
        Self::Geometry {
            reason: reason.to_string(),
        }
    }

    /// Create a script error from any displayable cause
    pub fn script(reason: impl fmt::Display) -> Self {
        Self::Script {
            reason: reason.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create an argument decoding error for `tool`
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a process error
    pub fn process(reason: impl Into<String>) -> Self {
        Self::Process {
            reason: reason.into(),
        }
    }

    /// Stable tag reported to callers alongside the message
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::AlreadyExists { .. } => "AlreadyExists",
            Self::UnsupportedOperation { .. } => "UnsupportedOperation",
            Self::UnsupportedFormat { .. } => "UnsupportedFormat",
            Self::InvalidArguments { .. } => "InvalidArguments",
            Self::UnknownTool { .. } => "UnknownTool",
            Self::Geometry { .. } => "GeometryError",
            Self::Script { .. } => "ScriptError",
            Self::MissingResult => "MissingResult",
            Self::Validation { .. } => "ValidationError",
            Self::NoCurrentObject => "NoCurrentObject",
            Self::Io(_) => "IOError",
            Self::Process { .. } => "ProcessError",
        }
    }

    /// Check if this is a lookup error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type using ModelingError
pub type Result<T> = std::result::Result<T, ModelingError>;
