//! # Create/Run Pipeline
//!
//! Wires the stages together in their fixed order:
//!
//! ```text
//! load config -> extract urns -> resolve packages -> fetch packages -> render project -> build & run
//! ```
//!
//! Each stage receives what it needs from the previous one through explicit
//! values ([`ResolvedPipeline`], [`ProjectContext`]); nothing is accumulated in
//! shared state. The first failing stage aborts everything after it.

use crate::config::ToolConfig;
use crate::error::Result;
use crate::logging::log_stage_error;
use crate::packages::{apply_revisions, GoGetFetcher, Package, PackageFetcher, SourceFetcher};
use crate::project::{CreateOptions, ProjectRenderer, RenderedProject};
use crate::resolver::{extract_urns, PackageResolver};
use crate::runner::{BuildRunner, SupervisorOutcome};
use crate::spirit::LoadedSpiritConfig;
use crate::toolchain::GoToolchain;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// A configuration with its references resolved to packages
#[derive(Debug, Clone)]
pub struct ResolvedPipeline {
    pub config: LoadedSpiritConfig,
    pub urns: Vec<String>,
    pub packages: Vec<Package>,
}

/// Everything known about a created project
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub pipeline: ResolvedPipeline,
    pub project: RenderedProject,
}

pub struct SpiritTool {
    config: ToolConfig,
    fetcher: Option<Arc<dyn SourceFetcher>>,
}

impl SpiritTool {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            config,
            fetcher: None,
        }
    }

    /// Replace the default `go get` based fetcher
    pub fn with_fetcher(mut self, fetcher: Arc<dyn SourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    fn toolchain(&self, workspace: &Path) -> GoToolchain {
        GoToolchain::new(self.config.toolchain.clone(), workspace)
    }

    fn source_root(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.config.layout.source_dir)
    }

    /// Load a configuration and resolve every URN it references
    pub fn resolve<P: AsRef<Path>>(
        &self,
        config_path: &Path,
        sources: &[P],
        workspace: &Path,
    ) -> Result<ResolvedPipeline> {
        let config = stage("load_config", LoadedSpiritConfig::load(config_path))?;
        let urns = extract_urns(&config.config);

        let resolver = PackageResolver::new(self.source_root(workspace));
        let packages = stage("resolve", resolver.resolve(sources, &urns))?;

        Ok(ResolvedPipeline {
            config,
            urns,
            packages,
        })
    }

    /// Resolve, optionally fetch, and render a project
    pub async fn create_project(
        &self,
        config_path: &Path,
        options: &CreateOptions,
        args: Option<&Map<String, Value>>,
    ) -> Result<ProjectContext> {
        stage("validate", options.validate())?;

        let mut pipeline = self.resolve(config_path, &options.sources, &options.workspace)?;
        let toolchain = self.toolchain(&options.workspace);

        pipeline.packages = if options.get_packages {
            let default_fetcher;
            let fetcher: &dyn SourceFetcher = match &self.fetcher {
                Some(fetcher) => fetcher.as_ref(),
                None => {
                    default_fetcher = GoGetFetcher::new(toolchain.clone());
                    &default_fetcher
                }
            };
            stage(
                "fetch",
                PackageFetcher::new(fetcher)
                    .fetch_all(
                        &pipeline.packages,
                        &options.packages_revision,
                        options.update_packages,
                    )
                    .await,
            )?
        } else {
            apply_revisions(&pipeline.packages, &options.packages_revision)
        };

        let renderer = ProjectRenderer::new(&self.config.layout, &toolchain);
        let project = stage(
            "render",
            renderer
                .render(options, &pipeline.packages, &pipeline.config, args)
                .await,
        )?;

        info!(
            project = %project.dir.display(),
            urns = pipeline.urns.len(),
            packages = pipeline.packages.len(),
            "Project created"
        );

        Ok(ProjectContext { pipeline, project })
    }

    /// Create the project, then build it and supervise the running program
    pub async fn run_project(
        &self,
        config_path: &Path,
        options: &CreateOptions,
        args: Option<&Map<String, Value>>,
    ) -> Result<(ProjectContext, SupervisorOutcome)> {
        let context = self.create_project(config_path, options, args).await?;

        let toolchain = self.toolchain(&options.workspace);
        let runner = BuildRunner::new(&toolchain, &self.config.supervisor);
        let outcome = stage("run", runner.run(&context.project.dir).await)?;

        info!(
            pid = ?outcome.pid,
            state = %outcome.final_state,
            exit_status = ?outcome.exit_status,
            "Run finished"
        );

        Ok((context, outcome))
    }
}

fn stage<T>(name: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        log_stage_error(name, e.category(), &e.to_string());
    }
    result
}
