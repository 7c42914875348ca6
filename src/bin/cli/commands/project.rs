//! Create and run command handlers

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use spirit_tool::{CreateOptions, SpiritTool, ToolConfig};
use std::path::PathBuf;

use super::workspace_or_gopath;
use crate::ProjectArgs;

/// Parsed form of the shared create/run arguments
struct ProjectRequest {
    config_path: PathBuf,
    options: CreateOptions,
    template_args: Option<Map<String, Value>>,
}

pub async fn handle_create_command(args: ProjectArgs, config: ToolConfig) -> Result<()> {
    let request = ProjectRequest::try_from(args)?;
    let tool = SpiritTool::new(config);

    let context = tool
        .create_project(
            &request.config_path,
            &request.options,
            request.template_args.as_ref(),
        )
        .await?;

    println!("Project created: {}", context.project.dir.display());
    println!("  Source: {}", context.project.source_path.display());
    println!("  Config: {}", context.project.config_copy_path.display());
    println!("  Packages: {}", context.pipeline.packages.len());
    Ok(())
}

pub async fn handle_run_command(args: ProjectArgs, config: ToolConfig) -> Result<()> {
    let request = ProjectRequest::try_from(args)?;
    let tool = SpiritTool::new(config);

    let (context, outcome) = tool
        .run_project(
            &request.config_path,
            &request.options,
            request.template_args.as_ref(),
        )
        .await?;

    match outcome.exit_status {
        Some(status) => println!(
            "{} exited ({status}) while {}",
            context.project.dir.display(),
            outcome.final_state
        ),
        None => println!(
            "{} was killed (pid {:?})",
            context.project.dir.display(),
            outcome.pid
        ),
    }
    Ok(())
}

impl TryFrom<ProjectArgs> for ProjectRequest {
    type Error = anyhow::Error;

    fn try_from(args: ProjectArgs) -> Result<Self> {
        let workspace = workspace_or_gopath(args.resolve.workspace)?;

        let template_args = match args.args {
            Some(raw) => {
                match serde_json::from_str::<Value>(&raw).context("template args are not valid JSON")? {
                    Value::Object(map) => Some(map),
                    _ => bail!("template args must be a JSON object"),
                }
            }
            None => None,
        };

        Ok(Self {
            config_path: args.resolve.config,
            options: CreateOptions {
                workspace,
                sources: args.resolve.sources,
                template_name: args.template,
                project_path: args.name,
                force_write: args.force,
                get_packages: args.get,
                update_packages: args.update,
                packages_revision: args.revisions.into_iter().collect(),
            },
            template_args,
        })
    }
}
