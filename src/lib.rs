#![allow(clippy::doc_markdown)] // Allow technical terms like GOPATH, URN in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Spirit Tool
//!
//! Turns a declarative spirit pipeline configuration into a runnable program.
//!
//! ## Overview
//!
//! A pipeline configuration names actors (translators, inboxes, outboxes,
//! receivers, senders, routers, components, label matchers, URN rewriters and
//! reader/writer pools), each identified by a URN. This crate resolves every
//! URN to the source package that implements it, makes sure those packages are
//! present in the workspace, renders a project from a template, and can build
//! and run the result under a supervisor that handles graceful shutdown.
//!
//! ## Module Organization
//!
//! - [`spirit`] - Pipeline configuration types and loading
//! - [`resolver`] - URN extraction and package resolution
//! - [`packages`] - Package coordinates and fetching
//! - [`project`] - Create options and project rendering
//! - [`runner`] - Build, launch and supervise the rendered program
//! - [`state_machine`] - Supervisor shutdown states
//! - [`pipeline`] - The create/run pipeline tying the stages together
//! - [`config`] - Tool configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spirit_tool::config::ToolConfigLoader;
//! use spirit_tool::pipeline::SpiritTool;
//! use spirit_tool::project::CreateOptions;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tool = SpiritTool::new(ToolConfigLoader::load(None)?);
//! let options = CreateOptions {
//!     workspace: PathBuf::from("/home/me/go"),
//!     sources: vec![PathBuf::from("sources.json")],
//!     template_name: "classic".to_string(),
//!     project_path: PathBuf::from("github.com/me/my-pipeline"),
//!     ..CreateOptions::default()
//! };
//!
//! let context = tool
//!     .create_project(Path::new("spirit.json"), &options, None)
//!     .await?;
//! println!("rendered {}", context.project.source_path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod packages;
pub mod pipeline;
pub mod project;
pub mod resolver;
pub mod runner;
pub mod spirit;
pub mod state_machine;
pub mod toolchain;

pub use config::{ToolConfig, ToolConfigLoader};
pub use error::{ErrorCategory, Result, SpiritError};
pub use packages::Package;
pub use pipeline::{ProjectContext, ResolvedPipeline, SpiritTool};
pub use project::CreateOptions;
pub use runner::SupervisorOutcome;
pub use state_machine::{ShutdownSignal, SupervisorState};
