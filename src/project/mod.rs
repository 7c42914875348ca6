//! # Project Assembly
//!
//! Renders a buildable project from a named template: the entry-point source
//! plus a verbatim copy of the pipeline configuration it was generated from.

pub mod context;
pub mod helpers;
pub mod options;
pub mod renderer;

pub use context::{merge_args, RenderContext};
pub use options::CreateOptions;
pub use renderer::{ProjectRenderer, RenderedProject, TemplatePaths};
