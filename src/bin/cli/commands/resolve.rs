//! Resolve command handler

use anyhow::Result;
use spirit_tool::{SpiritTool, ToolConfig};

use super::workspace_or_gopath;
use crate::ResolveArgs;

pub fn handle_resolve_command(args: ResolveArgs, config: ToolConfig) -> Result<()> {
    let workspace = workspace_or_gopath(args.workspace)?;
    let tool = SpiritTool::new(config);

    let resolved = tool.resolve(&args.config, &args.sources, &workspace)?;

    println!(
        "{} urns -> {} packages",
        resolved.urns.len(),
        resolved.packages.len()
    );
    for package in &resolved.packages {
        println!("  {}", package.uri);
    }

    Ok(())
}
