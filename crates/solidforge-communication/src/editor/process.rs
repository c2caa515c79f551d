//! External editor process management
//!
//! Launches one editor process from an ordered list of candidates and stops
//! it again. A candidate counts as launched once it is still alive after the
//! startup grace period. Stopping sends SIGTERM first (on Unix) and kills the
//! process if it has not exited within the shutdown timeout.

use serde::Serialize;
use solidforge_core::{ModelingError, Result};
use solidforge_settings::LaunchCandidate;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a running editor ended when asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopOutcome {
    /// Nothing was running
    NotRunning,
    /// Exited on its own after the termination request
    Terminated,
    /// Still alive after the timeout and was killed
    Killed,
}

/// A launched editor process
#[derive(Debug)]
pub struct EditorProcess {
    child: Child,
    command: String,
}

impl EditorProcess {
    /// Try each candidate in order and keep the first that survives `grace`.
    pub fn launch(
        candidates: &[LaunchCandidate],
        script: &Path,
        grace: Duration,
    ) -> Result<Self> {
        let mut failures = Vec::new();

        for candidate in candidates {
            match Self::launch_one(candidate, script, grace) {
                Ok(process) => {
                    info!("Successfully launched editor using: {}", candidate);
                    return Ok(process);
                }
                Err(reason) => {
                    warn!("Failed to launch with {}: {}", candidate, reason);
                    failures.push(format!("{}: {}", candidate, reason));
                }
            }
        }

        Err(ModelingError::process(format!(
            "all launch attempts failed ({})",
            failures.join("; ")
        )))
    }

    fn launch_one(
        candidate: &LaunchCandidate,
        script: &Path,
        grace: Duration,
    ) -> std::result::Result<Self, String> {
        // stdout belongs to the protocol, so the child gets none of our streams
        let mut child = Command::new(&candidate.program)
            .args(candidate.resolved_args(script))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| e.to_string())?;

        debug!("Spawned '{}' as pid {}", candidate, child.id());
        std::thread::sleep(grace);

        match child.try_wait() {
            Ok(None) => Ok(Self {
                child,
                command: candidate.to_string(),
            }),
            Ok(Some(status)) => Err(format!("exited during startup with {}", status)),
            Err(e) => {
                reap(&mut child);
                Err(e.to_string())
            }
        }
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// The command line this process was launched with.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Ask the process to exit, killing it after `timeout`.
    pub fn stop(mut self, timeout: Duration) -> Result<StopOutcome> {
        if !self.is_running() {
            return Ok(StopOutcome::NotRunning);
        }

        self.request_termination();

        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.child.try_wait()?.is_some() {
                info!("Editor process {} exited", self.child.id());
                return Ok(StopOutcome::Terminated);
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        warn!(
            "Editor process {} did not exit within {:?}, killing",
            self.child.id(),
            timeout
        );
        self.child
            .kill()
            .map_err(|e| ModelingError::process(format!("failed to kill editor: {}", e)))?;
        self.child.wait()?;
        Ok(StopOutcome::Killed)
    }

    #[cfg(unix)]
    fn request_termination(&mut self) {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let pid = Pid::from_raw(self.child.id() as i32);
        if let Err(e) = kill(pid, Signal::SIGTERM) {
            warn!("SIGTERM to {} failed: {}", pid, e);
        }
    }

    #[cfg(not(unix))]
    fn request_termination(&mut self) {
        // No polite signal here; the timeout path does the kill
        if let Err(e) = self.child.kill() {
            warn!("Terminating editor process failed: {}", e);
        }
    }
}

/// Kill a child we are giving up on and collect its exit status.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Kill of pid {} failed: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        warn!("Waiting on pid {} failed: {}", child.id(), e);
    }
}
