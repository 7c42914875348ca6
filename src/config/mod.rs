//! # Tool Configuration
//!
//! Settings that shape how the tool talks to the outside world: which
//! toolchain binaries to call, where templates and sources live under a
//! workspace, how the supervisor paces itself, and how logging is set up.
//!
//! Every field has a default, so an absent configuration file is valid.
//! Values can be overridden from a TOML file and from `SPIRIT_TOOL__*`
//! environment variables; see [`loader::ToolConfigLoader`].
//!
//! ```rust,no_run
//! use spirit_tool::config::ToolConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ToolConfigLoader::load(None)?;
//! println!("using {}", config.toolchain.go_binary);
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::constants::{DEFAULT_SOURCE_DIR, DEFAULT_TEMPLATE_ROOT, DEFAULT_TICK_INTERVAL_MS};
use crate::error::{Result, SpiritError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use loader::ToolConfigLoader;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub toolchain: ToolchainConfig,
    pub layout: LayoutConfig,
    pub supervisor: SupervisorConfig,
    pub logging: LoggingConfig,
}

/// External binaries used to fetch, build and format projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub go_binary: String,
    pub git_binary: String,
    /// Run the go tool in GOPATH mode (`GO111MODULE=off`, `GOPATH=<workspace>`)
    pub legacy_gopath: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            go_binary: "go".to_string(),
            git_binary: "git".to_string(),
            legacy_gopath: true,
        }
    }
}

/// Directory conventions below the workspace root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub source_dir: String,
    pub template_root: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            template_root: DEFAULT_TEMPLATE_ROOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    pub tick_interval_ms: u64,
    /// How long to wait for the child after the first shutdown signal before
    /// killing it. `None` waits until the child exits or a second signal arrives.
    pub stop_timeout_ms: Option<u64>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            stop_timeout_ms: None,
        }
    }
}

impl SupervisorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn stop_timeout(&self) -> Option<Duration> {
        self.stop_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive; `RUST_LOG` takes precedence when set
    pub level: Option<String>,
    /// Enables a JSON file log in this directory
    pub log_dir: Option<PathBuf>,
    /// Emit console output as JSON
    pub json: bool,
}

impl ToolConfig {
    /// Reject settings that would make every later stage fail in confusing ways
    pub fn validate(&self) -> Result<()> {
        if self.toolchain.go_binary.trim().is_empty() {
            return Err(SpiritError::config(
                "toolchain.go_binary",
                "go binary must not be empty",
            ));
        }
        if self.toolchain.git_binary.trim().is_empty() {
            return Err(SpiritError::config(
                "toolchain.git_binary",
                "git binary must not be empty",
            ));
        }
        if self.layout.source_dir.trim().is_empty() {
            return Err(SpiritError::config(
                "layout.source_dir",
                "source dir must not be empty",
            ));
        }
        if self.layout.template_root.trim().is_empty() {
            return Err(SpiritError::config(
                "layout.template_root",
                "template root must not be empty",
            ));
        }
        if self.supervisor.tick_interval_ms == 0 {
            return Err(SpiritError::config(
                "supervisor.tick_interval_ms",
                "tick interval must be greater than zero",
            ));
        }
        Ok(())
    }
}
