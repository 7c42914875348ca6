//! # Layout Constants
//!
//! File names and directory conventions shared by the renderer, the build
//! runner and the CLI.

/// Entry-point source file, both as template name and as rendered output
pub const ENTRY_POINT_FILE: &str = "main.go";

/// Default template arguments, sibling of the entry-point template
pub const TEMPLATE_ARGS_FILE: &str = "args.json";

/// Name of the compiled executable inside the project directory
pub const ARTIFACT_NAME: &str = "main";

/// Source directory under the workspace root
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Template root, relative to the workspace source directory
pub const DEFAULT_TEMPLATE_ROOT: &str = "github.com/gogap/spirit-tool/template";

pub const DEFAULT_TEMPLATE_NAME: &str = "classic";

/// Supervisor wake-up interval; keeps the wait loop responsive and does nothing else
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

