//! # Editor Bridge
//!
//! Hand-off between the modeling service and an external interactive CAD
//! editor. The bridge owns a directory with two shared files:
//!
//! - `current_script.py`: script text pushed to and pulled from the editor
//! - `current_model.step`: model file written for the editor to open
//!
//! Pulling is a plain text read. The bridge never evaluates the script and
//! never imports live geometry from the editor.

pub mod process;

pub use process::{EditorProcess, StopOutcome};

use serde::Serialize;
use solidforge_core::Result;
use solidforge_settings::EditorSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const SCRIPT_FILE_NAME: &str = "current_script.py";
pub const MODEL_FILE_NAME: &str = "current_model.step";

/// One launch candidate as seen by [`EditorBridge::diagnose`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateStatus {
    pub command: String,
    pub program: String,
    /// Where the program was found, if anywhere
    pub resolved: Option<PathBuf>,
}

/// Installation and runtime report for the external editor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorDiagnostics {
    pub candidates: Vec<CandidateStatus>,
    pub running: bool,
    pub pid: Option<u32>,
    pub running_command: Option<String>,
    pub script_file: PathBuf,
    pub model_file: PathBuf,
}

#[derive(Debug)]
pub struct EditorBridge {
    dir: PathBuf,
    script_file: PathBuf,
    model_file: PathBuf,
    settings: EditorSettings,
    process: Option<EditorProcess>,
}

impl EditorBridge {
    /// Create the bridge directory and seed the shared script.
    pub fn new(dir: impl Into<PathBuf>, settings: EditorSettings) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let script_file = dir.join(SCRIPT_FILE_NAME);
        let model_file = dir.join(MODEL_FILE_NAME);
        std::fs::write(&script_file, &settings.initial_script)?;

        info!("Editor bridge at {}", dir.display());
        Ok(Self {
            dir,
            script_file,
            model_file,
            settings,
            process: None,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn script_file(&self) -> &Path {
        &self.script_file
    }

    pub fn model_file(&self) -> &Path {
        &self.model_file
    }

    /// Overwrite the shared script.
    pub fn push_script(&self, text: &str) -> Result<&Path> {
        std::fs::write(&self.script_file, text)?;
        debug!("Pushed {} bytes to {}", text.len(), self.script_file.display());
        Ok(&self.script_file)
    }

    /// Read the shared script as the editor last left it.
    pub fn pull_script(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.script_file)?)
    }

    pub fn is_running(&mut self) -> bool {
        self.process.as_mut().is_some_and(EditorProcess::is_running)
    }

    /// Launch the editor; a no-op when it is already running.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            debug!("Editor already running");
            return Ok(());
        }

        let grace = Duration::from_millis(self.settings.startup_grace_ms);
        let process = EditorProcess::launch(&self.settings.candidates, &self.script_file, grace)?;
        self.process = Some(process);
        Ok(())
    }

    /// Stop the editor if one was launched.
    pub fn stop(&mut self) -> Result<StopOutcome> {
        match self.process.take() {
            Some(process) => {
                let timeout = Duration::from_millis(self.settings.shutdown_timeout_ms);
                process.stop(timeout)
            }
            None => Ok(StopOutcome::NotRunning),
        }
    }

    pub fn diagnose(&mut self) -> EditorDiagnostics {
        let running = self.is_running();
        let candidates = self
            .settings
            .candidates
            .iter()
            .map(|candidate| CandidateStatus {
                command: candidate.to_string(),
                program: candidate.program.clone(),
                resolved: find_program(&candidate.program),
            })
            .collect();

        EditorDiagnostics {
            candidates,
            running,
            pid: self.process.as_ref().filter(|_| running).map(EditorProcess::id),
            running_command: self
                .process
                .as_ref()
                .filter(|_| running)
                .map(|p| p.command().to_string()),
            script_file: self.script_file.clone(),
            model_file: self.model_file.clone(),
        }
    }
}

/// Locate `program` the way a process spawn would: as a path, or on `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", program));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
