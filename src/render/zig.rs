//! Zig renderer: doc-commented declarations, one block per binding.

use crate::model::Binding;
use crate::render::Renderer;
use anyhow::Result;

pub struct ZigRenderer {
    /// Emitted once at the top, e.g. the `@cImport` block.
    pub preamble: Option<String>,
}

impl Renderer for ZigRenderer {
    fn render(&self, bindings: &[Binding]) -> Result<String> {
        let mut out = String::new();

        if let Some(ref preamble) = self.preamble {
            let preamble = preamble.trim();
            if !preamble.is_empty() {
                out.push_str(preamble);
                out.push_str("\n\n");
            }
        }

        for (i, binding) in bindings.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&render_binding(binding));
        }

        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "zig"
    }
}

fn render_binding(binding: &Binding) -> String {
    let mut out = String::new();

    for line in &binding.doc {
        if line.is_empty() {
            out.push_str("///\n");
        } else {
            out.push_str(&format!("/// {}\n", line));
        }
    }
    if !binding.doc.is_empty() {
        out.push_str("///\n");
    }
    out.push_str(&format!("/// See: {}\n", binding.link));

    out.push_str(binding.declaration.trim_end());
    out.push('\n');
    out
}
