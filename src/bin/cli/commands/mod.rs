//! Command handlers for the spirit tool CLI

pub mod project;
pub mod resolve;

pub use project::{handle_create_command, handle_run_command};
pub use resolve::handle_resolve_command;

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Explicit workspace, else `$GOPATH`
pub(crate) fn workspace_or_gopath(workspace: Option<PathBuf>) -> Result<PathBuf> {
    workspace
        .or_else(|| std::env::var_os("GOPATH").map(PathBuf::from))
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or_else(|| anyhow!("no workspace given and GOPATH is not set"))
}
