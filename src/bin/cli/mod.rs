//! CLI module for the spirit tool
//!
//! Command handlers live in [`commands`], one file per command family.

pub mod commands;

pub use commands::{handle_create_command, handle_resolve_command, handle_run_command};
