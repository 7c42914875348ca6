//! Project rendering: template lookup, argument merging, directory
//! preparation, rendering and writing.

use super::context::{merge_args, RenderContext};
use super::helpers::register_strict_helpers;
use super::options::CreateOptions;
use crate::config::LayoutConfig;
use crate::constants::{ENTRY_POINT_FILE, TEMPLATE_ARGS_FILE};
use crate::error::{Result, SpiritError};
use crate::packages::Package;
use crate::spirit::LoadedSpiritConfig;
use crate::toolchain::GoToolchain;
use chrono::Utc;
use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Files that make up a named template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub template: PathBuf,
    pub args: PathBuf,
}

/// Result of a successful render
#[derive(Debug, Clone)]
pub struct RenderedProject {
    pub dir: PathBuf,
    pub source_path: PathBuf,
    pub config_copy_path: PathBuf,
}

pub struct ProjectRenderer<'a> {
    layout: &'a LayoutConfig,
    toolchain: &'a GoToolchain,
}

impl<'a> ProjectRenderer<'a> {
    pub fn new(layout: &'a LayoutConfig, toolchain: &'a GoToolchain) -> Self {
        Self { layout, toolchain }
    }

    /// Workspace directory import paths, projects and templates are rooted at
    pub fn source_root(&self, options: &CreateOptions) -> PathBuf {
        options.workspace.join(&self.layout.source_dir)
    }

    pub fn template_paths(&self, options: &CreateOptions) -> TemplatePaths {
        let dir = self
            .source_root(options)
            .join(&self.layout.template_root)
            .join(&options.template_name);
        TemplatePaths {
            template: dir.join(ENTRY_POINT_FILE),
            args: dir.join(TEMPLATE_ARGS_FILE),
        }
    }

    pub async fn render(
        &self,
        options: &CreateOptions,
        packages: &[Package],
        config: &LoadedSpiritConfig,
        extra_args: Option<&Map<String, Value>>,
    ) -> Result<RenderedProject> {
        if config.file_name == ENTRY_POINT_FILE {
            return Err(SpiritError::validation(
                "config",
                format!(
                    "configuration file {} would overwrite the generated {ENTRY_POINT_FILE}",
                    config.path.display()
                ),
            ));
        }

        let paths = self.template_paths(options);
        info!(template = %options.template_name, path = %paths.template.display(), "Using template");
        info!(template = %options.template_name, path = %paths.args.display(), "Using template args");

        let registry = load_template(&paths.template).await?;
        let args = merge_args(load_default_args(&paths.args).await?, extra_args);

        let project_dir = options.project_dir(&self.source_root(options));
        prepare_project_dir(&project_dir, options.force_write).await?;

        let context = RenderContext {
            create_options: options,
            packages,
            config: config.path.display().to_string(),
            config_filename: &config.file_name,
            create_time: Utc::now(),
            args,
        };
        let rendered = registry
            .render(ENTRY_POINT_FILE, &context)
            .map_err(|e| SpiritError::render(paths.template.display().to_string(), e.to_string()))?;

        let source_path = project_dir.join(ENTRY_POINT_FILE);
        tokio::fs::write(&source_path, rendered.as_bytes())
            .await
            .map_err(|e| SpiritError::io(&source_path, e))?;

        let config_copy_path = project_dir.join(&config.file_name);
        tokio::fs::write(&config_copy_path, &config.original)
            .await
            .map_err(|e| SpiritError::io(&config_copy_path, e))?;

        if let Err(failure) = self.toolchain.format(&source_path).await {
            warn!(path = %source_path.display(), error = %failure, "Formatting rendered source failed, keeping unformatted output");
        }

        info!(project = %project_dir.display(), "Project rendered");

        Ok(RenderedProject {
            dir: project_dir,
            source_path,
            config_copy_path,
        })
    }
}

/// Parse the entry-point template. Unknown keys fail at render time, also
/// inside block helpers, and output is not HTML-escaped.
async fn load_template(path: &Path) -> Result<Handlebars<'static>> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SpiritError::render(path.display().to_string(), e.to_string()))?;

    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    register_strict_helpers(&mut registry);
    registry
        .register_template_string(ENTRY_POINT_FILE, source)
        .map_err(|e| SpiritError::render(path.display().to_string(), e.to_string()))?;

    Ok(registry)
}

/// Template defaults; a missing file means no defaults
async fn load_default_args(path: &Path) -> Result<Map<String, Value>> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(SpiritError::io(path, e)),
    };

    match serde_json::from_slice(&data) {
        Ok(Value::Object(args)) => Ok(args),
        Ok(_) => Err(SpiritError::config(
            path.display().to_string(),
            "template args must be a JSON object",
        )),
        Err(e) => Err(SpiritError::config(
            path.display().to_string(),
            format!("malformed template args: {e}"),
        )),
    }
}

async fn prepare_project_dir(dir: &Path, force_write: bool) -> Result<()> {
    let exists = tokio::fs::try_exists(dir)
        .await
        .map_err(|e| SpiritError::io(dir, e))?;

    if exists {
        if !force_write {
            return Err(SpiritError::ProjectExists {
                path: dir.to_path_buf(),
            });
        }
        warn!(project = %dir.display(), "Project path already exists, it will be overwritten");
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| SpiritError::io(dir, e))
}
