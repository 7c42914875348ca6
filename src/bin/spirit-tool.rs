//! # Spirit Tool CLI
//!
//! Command-line interface for creating, resolving and running spirit
//! pipeline projects.

mod cli;

use clap::{Args, Parser, Subcommand};
use spirit_tool::config::ToolConfigLoader;
use spirit_tool::logging::init_structured_logging;
use spirit_tool::SpiritError;
use std::path::PathBuf;
use tracing::info;

use cli::{handle_create_command, handle_resolve_command, handle_run_command};

#[derive(Parser, Debug)]
#[command(name = "spirit-tool")]
#[command(about = "Resolve, render, build and run spirit pipeline projects")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Tool configuration file (TOML)
    #[arg(long, global = true)]
    tool_config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a project from a pipeline configuration
    Create(ProjectArgs),
    /// Render, build and run a project, supervising it until it exits
    Run(ProjectArgs),
    /// Print the packages a pipeline configuration depends on
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Pipeline configuration file
    #[arg(short, long)]
    pub config: PathBuf,
    /// URN package source documents, merged in the given order
    #[arg(short, long = "source", required = true)]
    pub sources: Vec<PathBuf>,
    /// Workspace root (defaults to $GOPATH)
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub resolve: ResolveArgs,
    /// Template name under the workspace template root
    #[arg(short, long, default_value = spirit_tool::constants::DEFAULT_TEMPLATE_NAME)]
    pub template: String,
    /// Project path, relative to the workspace source dir unless absolute
    #[arg(short, long)]
    pub name: PathBuf,
    /// Overwrite an existing project directory
    #[arg(short, long)]
    pub force: bool,
    /// Fetch the resolved packages before rendering
    #[arg(short, long)]
    pub get: bool,
    /// Update packages that are already present (with --get)
    #[arg(short, long)]
    pub update: bool,
    /// Revision pin as <import path>=<revision>, repeatable
    #[arg(short, long = "revision", value_parser = parse_revision)]
    pub revisions: Vec<(String, String)>,
    /// Extra template arguments as a JSON object
    #[arg(short, long)]
    pub args: Option<String>,
}

fn parse_revision(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((pkg, revision)) if !pkg.is_empty() && !revision.is_empty() => {
            Ok((pkg.to_string(), revision.to_string()))
        }
        _ => Err(format!("expected <import path>=<revision>, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match ToolConfigLoader::load(cli.tool_config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error [{}]: {e}", e.category());
            std::process::exit(1);
        }
    };

    // Verbosity flags override configured level
    match cli.verbose {
        0 => {}
        1 => config.logging.level = Some("info".to_string()),
        2 => config.logging.level = Some("debug".to_string()),
        _ => config.logging.level = Some("trace".to_string()),
    }
    init_structured_logging(&config.logging);

    info!(
        go_binary = %config.toolchain.go_binary,
        template_root = %config.layout.template_root,
        "Spirit tool starting"
    );

    let result = match cli.command {
        Commands::Create(args) => handle_create_command(args, config).await,
        Commands::Run(args) => handle_run_command(args, config).await,
        Commands::Resolve(args) => handle_resolve_command(args, config),
    };

    if let Err(e) = result {
        match e.downcast_ref::<SpiritError>() {
            Some(spirit_error) => eprintln!("error [{}]: {spirit_error}", spirit_error.category()),
            None => eprintln!("error: {e:#}"),
        }
        std::process::exit(1);
    }
}
