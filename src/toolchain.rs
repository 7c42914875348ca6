//! # Toolchain Commands
//!
//! Thin wrapper around the external `go` and `git` binaries. Every call
//! captures output and reports failures with the command line and stderr so
//! the calling stage can wrap them in its own error type.

use crate::config::ToolchainConfig;
use crate::constants::{ARTIFACT_NAME, ENTRY_POINT_FILE};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Failure of an external command, before it is mapped onto a pipeline error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{command}`: {message}")]
pub struct CommandFailure {
    pub command: String,
    pub message: String,
}

pub type CommandResult = std::result::Result<String, CommandFailure>;

#[derive(Debug, Clone)]
pub struct GoToolchain {
    config: ToolchainConfig,
    workspace: PathBuf,
}

impl GoToolchain {
    pub fn new(config: ToolchainConfig, workspace: impl Into<PathBuf>) -> Self {
        Self {
            config,
            workspace: workspace.into(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// `go get -d [-u] <uri>`: download without installing
    pub async fn get(&self, uri: &str, update: bool) -> CommandResult {
        let mut args = vec!["get", "-d"];
        if update {
            args.push("-u");
        }
        args.push(uri);
        self.run(self.go_command(args), None).await
    }

    /// `git checkout <revision>` inside a fetched package
    pub async fn checkout(&self, source_dir: &Path, revision: &str) -> CommandResult {
        let mut command = Command::new(&self.config.git_binary);
        command.args(["checkout", revision]);
        self.run(command, Some(source_dir)).await
    }

    /// `go build -o main main.go` inside the project directory
    pub async fn build(&self, project_dir: &Path) -> CommandResult {
        let command = self.go_command(["build", "-o", ARTIFACT_NAME, ENTRY_POINT_FILE]);
        self.run(command, Some(project_dir)).await
    }

    /// `go fmt <file>`
    pub async fn format(&self, source: &Path) -> CommandResult {
        let command = self.go_command([OsStr::new("fmt"), source.as_os_str()]);
        self.run(command, source.parent()).await
    }

    fn go_command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.config.go_binary);
        command.args(args);
        if self.config.legacy_gopath {
            command.env("GOPATH", &self.workspace).env("GO111MODULE", "off");
        }
        command
    }

    async fn run(&self, mut command: Command, dir: Option<&Path>) -> CommandResult {
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let line = describe(&command);
        debug!(command = %line, "Executing command");

        let output = command.output().await.map_err(|e| CommandFailure {
            command: line.clone(),
            message: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(command = %line, status = %output.status, stderr = %stderr, "Command failed");

        Err(CommandFailure {
            command: line,
            message: if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {stderr}", output.status)
            },
        })
    }
}

fn describe(command: &Command) -> String {
    let std_command = command.as_std();
    std::iter::once(std_command.get_program())
        .chain(std_command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
