//! JSON renderer: one record per binding for downstream generators.

use crate::model::Binding;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, bindings: &[Binding]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(bindings).context("failed to serialize bindings")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
