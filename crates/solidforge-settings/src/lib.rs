//! SolidForge Settings Crate
//!
//! Handles service configuration: geometry backend selection, export
//! precision, artifact location, editor launch strategies, and logging.

pub mod config;
pub mod error;

pub use config::{
    Config, EditorSettings, EngineBackend, EngineSettings, ExportConfig, LaunchCandidate,
    LoggingSettings, RenderSettings, CONFIG_ENV_VAR,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
