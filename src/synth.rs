//! Binding synthesis: registry entries → documented declarations.

use crate::config::{ManualConfig, Templates};
use crate::error::{Error, Result};
use crate::extract::SectionSource;
use crate::model::{Binding, Category, SectionNode};
use crate::registry::Registry;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").unwrap());

/// Stable link to a symbol's entry in the online manual.
pub fn manual_link(base_url: &str, name: &str) -> String {
    format!("{base_url}#{name}")
}

/// A registry entry that produced no binding.
#[derive(Debug)]
pub struct Failure {
    pub symbol: String,
    pub category: Category,
    pub error: Error,
}

/// Outcome of a full run, in registry order.
#[derive(Debug, Default)]
pub struct Synthesis {
    pub bindings: Vec<Binding>,
    pub failures: Vec<Failure>,
}

pub struct Synthesizer<'a, S: SectionSource> {
    source: &'a S,
    registry: &'a Registry,
    templates: &'a Templates,
    base_url: &'a str,
    prototype_label: &'a str,
}

impl<'a, S: SectionSource> Synthesizer<'a, S> {
    pub fn new(
        source: &'a S,
        registry: &'a Registry,
        templates: &'a Templates,
        manual: &'a ManualConfig,
    ) -> Self {
        Synthesizer {
            source,
            registry,
            templates,
            base_url: &manual.base_url,
            prototype_label: &manual.prototype_label,
        }
    }

    /// Bind every registry entry. Failures are collected, never fatal here.
    pub fn run(&self) -> Synthesis {
        let mut synthesis = Synthesis::default();
        for (category, name) in self.registry.entries() {
            match self.bind(category, name) {
                Ok(binding) => synthesis.bindings.push(binding),
                Err(error) => synthesis.failures.push(Failure {
                    symbol: name.to_string(),
                    category,
                    error,
                }),
            }
        }
        tracing::debug!(
            bound = synthesis.bindings.len(),
            failed = synthesis.failures.len(),
            "synthesized bindings"
        );
        synthesis
    }

    /// Build one binding, preferring an override over live extraction.
    pub fn bind(&self, category: Category, name: &str) -> Result<Binding> {
        let link = manual_link(self.base_url, name);

        if let Some(entry) = self.registry.override_for(name) {
            return Ok(Binding {
                symbol: name.to_string(),
                category,
                doc: dedent_lines(&entry.prose),
                declaration: entry.declaration.clone(),
                link,
            });
        }

        let section = self.source.extract(name)?;
        let template = self.templates.get(category);
        let prototype = match &section.prototype {
            Some(node) => dedent_lines(&node.text).join("\n"),
            None if template.contains("${prototype}") => {
                return Err(Error::MissingPrototype(name.to_string()))
            }
            None => String::new(),
        };

        let declaration = fill_template(
            template,
            &[("name", name), ("prototype", prototype.as_str()), ("link", link.as_str())],
        );

        Ok(Binding {
            symbol: name.to_string(),
            category,
            doc: prose_lines(&section.prose, self.prototype_label),
            declaration,
            link,
        })
    }
}

/// Render prose nodes as doc-comment lines.
///
/// Each non-empty source line becomes one line with its whitespace collapsed.
/// Blocks are separated by a blank line; fixed-layout blocks are fenced verbatim.
pub fn prose_lines(nodes: &[SectionNode], prototype_label: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for node in nodes {
        let block = if node.has_label(prototype_label) {
            fenced(&node.text)
        } else {
            node.text
                .lines()
                .map(|line| RE_WHITESPACE.replace_all(line.trim(), " ").into_owned())
                .filter(|line| !line.is_empty())
                .collect()
        };
        if block.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(block);
    }
    lines
}

fn fenced(text: &str) -> Vec<String> {
    let body = dedent_lines(text);
    if body.is_empty() {
        return body;
    }
    let mut block = Vec::with_capacity(body.len() + 2);
    block.push("```c".to_string());
    block.extend(body);
    block.push("```".to_string());
    block
}

/// Strip common leading indentation and surrounding blank lines.
pub fn dedent_lines(text: &str) -> Vec<String> {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| *c == ' ' || *c == '\t').count())
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line[indent..].trim_end().to_string()
            }
        })
        .collect();

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading);
    lines
}

/// Substitute `${key}` placeholders.
///
/// A multi-line value repeats whatever precedes the placeholder on its
/// template line, so `/// ${prototype}` yields one `///` line per line.
/// Unknown placeholders are left untouched.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    template
        .lines()
        .map(|line| {
            RE_PLACEHOLDER
                .replace_all(line, |caps: &Captures| {
                    let whole = caps.get(0).map_or(0..0, |m| m.range());
                    match vars.iter().find(|(key, _)| *key == &caps[1]) {
                        Some((_, value)) => {
                            let prefix = &line[..whole.start];
                            value.lines().collect::<Vec<_>>().join(&format!("\n{prefix}"))
                        }
                        None => caps[0].to_string(),
                    }
                })
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
