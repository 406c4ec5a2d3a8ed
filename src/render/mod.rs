//! Renderer module: trait-based output format dispatch.

pub mod json;
pub mod zig;

use crate::model::Binding;
use anyhow::{anyhow, Result};

/// Trait for rendering bindings into a specific output format.
pub trait Renderer {
    fn render(&self, bindings: &[Binding]) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, preamble: Option<&str>) -> Result<Box<dyn Renderer>> {
    match format {
        "zig" => Ok(Box::new(zig::ZigRenderer {
            preamble: preamble.map(str::to_string),
        })),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use zig or json", format)),
    }
}
