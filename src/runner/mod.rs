//! # Build and Run
//!
//! Compiles a rendered project, launches the artifact with the project as
//! its working directory, and supervises it until it exits or is killed.

pub mod signals;
pub mod supervisor;

use crate::config::SupervisorConfig;
use crate::constants::ARTIFACT_NAME;
use crate::error::{Result, SpiritError};
use crate::toolchain::GoToolchain;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::info;

pub use signals::spawn_signal_listener;
pub use supervisor::{ProcessSupervisor, SupervisorOutcome};

/// Buffered shutdown messages between the listener and the supervisor
const SIGNAL_CHANNEL_CAPACITY: usize = 4;

pub struct BuildRunner<'a> {
    toolchain: &'a GoToolchain,
    supervisor: &'a SupervisorConfig,
}

impl<'a> BuildRunner<'a> {
    pub fn new(toolchain: &'a GoToolchain, supervisor: &'a SupervisorConfig) -> Self {
        Self {
            toolchain,
            supervisor,
        }
    }

    /// Compile the project, returning the artifact's absolute path
    pub async fn build(&self, project_dir: &Path) -> Result<PathBuf> {
        let project_dir = tokio::fs::canonicalize(project_dir)
            .await
            .map_err(|e| SpiritError::io(project_dir, e))?;

        info!(project = %project_dir.display(), "Building project");
        self.toolchain
            .build(&project_dir)
            .await
            .map_err(|failure| SpiritError::build(&project_dir, failure.to_string()))?;

        Ok(project_dir.join(ARTIFACT_NAME))
    }

    /// Start the artifact with the project directory as working directory
    pub fn launch(&self, artifact: &Path, project_dir: &Path) -> Result<Child> {
        let child = Command::new(artifact)
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                SpiritError::runtime(format!("failed to launch {}: {e}", artifact.display()))
            })?;

        info!(pid = ?child.id(), artifact = %artifact.display(), "Process started");
        Ok(child)
    }

    /// Build, launch and supervise until the process is gone
    pub async fn run(&self, project_dir: &Path) -> Result<SupervisorOutcome> {
        let artifact = self.build(project_dir).await?;
        let working_dir = artifact
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dir.to_path_buf());

        let (tx, rx) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
        let listener = spawn_signal_listener(tx)?;

        let child = match self.launch(&artifact, &working_dir) {
            Ok(child) => child,
            Err(e) => {
                listener.abort();
                return Err(e);
            }
        };

        let outcome = ProcessSupervisor::new(self.supervisor)
            .spawn(child, rx)
            .await;
        listener.abort();

        outcome.map_err(|e| SpiritError::runtime(format!("supervisor task failed: {e}")))?
    }
}
