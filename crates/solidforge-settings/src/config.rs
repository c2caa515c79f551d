//! Configuration management for SolidForge
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Engine settings (geometry backend, tessellation density)
//! - Export settings (artifact directory, STEP precision)
//! - Render settings (preview image size)
//! - Editor settings (launch strategies, grace period, shared script)
//! - Logging settings (level, output format)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SOLIDFORGE_CONFIG";

/// Geometry backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineBackend {
    /// Mesh CSG backend
    #[default]
    Csg,
    /// Deterministic bounding-box backend for tests
    Fake,
}

impl std::fmt::Display for EngineBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csg => write!(f, "csg"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Which geometry backend to construct
    pub backend: EngineBackend,
    /// Facets around a cylinder
    pub cylinder_segments: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            backend: EngineBackend::default(),
            cylinder_segments: 48,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Artifact directory; a scratch directory is created when unset
    pub output_dir: Option<PathBuf>,
    /// Linear tolerance for STEP-family exports
    pub step_tolerance: f64,
    /// Angular tolerance for STEP-family exports, in degrees
    pub step_angular_tolerance: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            step_tolerance: 0.001,
            step_angular_tolerance: 0.1,
        }
    }
}

/// Render settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// One way of launching the external editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCandidate {
    /// Executable name or path
    pub program: String,
    /// Arguments; `{script}` is replaced by the shared script path
    #[serde(default)]
    pub args: Vec<String>,
}

impl LaunchCandidate {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Arguments with `{script}` substituted.
    pub fn resolved_args(&self, script: &Path) -> Vec<String> {
        let script = script.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{script}", &script))
            .collect()
    }
}

impl std::fmt::Display for LaunchCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

const DEFAULT_EDITOR_SCRIPT: &str =
    "import cadquery as cq\n\n# Initial empty script\nresult = cq.Workplane('XY')";

/// External editor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Launch strategies, tried in order
    pub candidates: Vec<LaunchCandidate>,
    /// How long a launched process must stay alive to count as started
    pub startup_grace_ms: u64,
    /// How long to wait for graceful termination before killing
    pub shutdown_timeout_ms: u64,
    /// Script written to the shared file when the bridge is created
    pub initial_script: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let python = if cfg!(windows) { "python" } else { "python3" };
        Self {
            candidates: vec![
                LaunchCandidate::new("cq-editor", &["{script}"]),
                LaunchCandidate::new(python, &["-m", "cq_editor"]),
            ],
            startup_grace_ms: 2000,
            shutdown_timeout_ms: 5000,
            initial_script: DEFAULT_EDITOR_SCRIPT.to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete service configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub export: ExportConfig,
    pub render: RenderSettings,
    pub editor: EditorSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// All defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the config file: `$SOLIDFORGE_CONFIG`, then the user config dir.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir()
            .map(|dir| dir.join("solidforge").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Load from the resolved path, or defaults when there is none.
    pub fn load() -> SettingsResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                info!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a `.toml` or `.json` file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into(),
                )
            }
        };

        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate, then write in the format the extension names.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into(),
                )
            }
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.cylinder_segments < 3 {
            return Err(out_of_range(
                "engine.cylinder_segments",
                self.engine.cylinder_segments,
            ));
        }

        if !(self.export.step_tolerance > 0.0) {
            return Err(out_of_range("export.step_tolerance", self.export.step_tolerance));
        }

        if !(self.export.step_angular_tolerance > 0.0) {
            return Err(out_of_range(
                "export.step_angular_tolerance",
                self.export.step_angular_tolerance,
            ));
        }

        if self.render.width == 0 || self.render.height == 0 {
            return Err(out_of_range(
                "render",
                format!("{}x{}", self.render.width, self.render.height),
            ));
        }

        if self.editor.candidates.is_empty() {
            return Err(ConfigError::Empty("editor.candidates".to_string()));
        }

        if self.editor.candidates.iter().any(|c| c.program.trim().is_empty()) {
            return Err(ConfigError::Empty("editor.candidates[].program".to_string()));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.backend, EngineBackend::Csg);
        assert_eq!(config.export.step_tolerance, 0.001);
        assert_eq!(config.export.step_angular_tolerance, 0.1);
        assert_eq!(config.editor.startup_grace_ms, 2000);
        assert_eq!(config.editor.candidates[0].program, "cq-editor");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        config.engine.cylinder_segments = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.step_tolerance = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.editor.candidates.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Empty(_))));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[engine]\nbackend = \"fake\"\n").unwrap();
        assert_eq!(config.engine.backend, EngineBackend::Fake);
        assert_eq!(config.engine.cylinder_segments, 48);
        assert_eq!(config.render.width, 800);
    }

    #[test]
    fn test_save_then_load_toml_and_json() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.engine.backend = EngineBackend::Fake;
        config.export.output_dir = Some(temp.path().join("out"));
        config.logging.json = true;

        for file in ["config.toml", "config.json"] {
            let path = temp.path().join(file);
            config.save_to_file(&path).unwrap();
            let loaded = Config::load_from_file(&path).unwrap();
            assert_eq!(loaded.engine.backend, EngineBackend::Fake);
            assert_eq!(loaded.export.output_dir, config.export.output_dir);
            assert!(loaded.logging.json);
        }
    }

    #[test]
    fn test_load_follows_env_override() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("override.toml");
        std::fs::write(&path, "[render]\nwidth = 320\n").unwrap();

        std::env::set_var(CONFIG_ENV_VAR, &path);
        let loaded = Config::load();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(loaded.unwrap().render.width, 320);
    }

    #[test]
    fn test_file_errors() {
        let temp = tempfile::tempdir().unwrap();

        let err = Config::load_from_file(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));

        let yaml = temp.path().join("config.yaml");
        std::fs::write(&yaml, "engine: {}").unwrap();
        let err = Config::load_from_file(&yaml).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigError::UnsupportedFormat(_))
        ));

        let bad = temp.path().join("bad.toml");
        std::fs::write(&bad, "[engine]\ncylinder_segments = 1\n").unwrap();
        let err = Config::load_from_file(&bad).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_candidate_script_substitution() {
        let candidate = LaunchCandidate::new("cq-editor", &["{script}", "--flag"]);
        let args = candidate.resolved_args(Path::new("/tmp/current_script.py"));
        assert_eq!(args, vec!["/tmp/current_script.py", "--flag"]);
        assert_eq!(candidate.to_string(), "cq-editor {script} --flag");
    }
}
