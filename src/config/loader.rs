//! Configuration Loader
//!
//! Layers an optional TOML file and `SPIRIT_TOOL__*` environment variables on
//! top of the built-in defaults. Later sources win.

use super::ToolConfig;
use crate::error::{Result, SpiritError};
use ::config::{Config, Environment, File, FileFormat, Map};
use std::path::Path;
use tracing::debug;

const ENV_PREFIX: &str = "SPIRIT_TOOL";
const ENV_SEPARATOR: &str = "__";

pub struct ToolConfigLoader;

impl ToolConfigLoader {
    /// Load configuration from an optional file plus the process environment
    pub fn load(path: Option<&Path>) -> Result<ToolConfig> {
        Self::load_with_env(path, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment. Useful for tests that must not touch global state.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<ToolConfig> {
        let source_name = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string());

        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading tool configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config = builder
            .build()
            .and_then(|built| built.try_deserialize::<ToolConfig>())
            .map_err(|e| SpiritError::config(&source_name, e.to_string()))?;

        config.validate()?;

        debug!(
            source = %source_name,
            go_binary = %config.toolchain.go_binary,
            template_root = %config.layout.template_root,
            "Tool configuration loaded"
        );

        Ok(config)
    }
}
