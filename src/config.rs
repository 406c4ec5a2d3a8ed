//! TOML configuration: manual conventions, split regions, registry and templates.
//!
//! The bundled `data/lua51.toml` targets the Lua 5.1 reference manual and is
//! used whenever no `--config` file is given.

use crate::model::{Category, OverrideEntry};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUNDLED: &str = include_str!("../data/lua51.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub manual: ManualConfig,
    #[serde(default)]
    pub split: SplitConfig,
    pub symbols: SymbolLists,
    #[serde(default)]
    pub templates: Templates,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub overrides: BTreeMap<String, OverrideEntry>,
}

impl Config {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config: {}", path.display()))
    }

    /// The Lua 5.1 configuration shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED).context("invalid bundled config")
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Conventions of the targeted manual.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManualConfig {
    /// Online manual URL; symbol names are appended as fragments.
    pub base_url: String,
    pub encoding: Encoding,
    /// Element that separates consecutive entries.
    pub separator_label: String,
    /// Fixed-layout element holding a prototype.
    pub prototype_label: String,
}

impl Default for ManualConfig {
    fn default() -> Self {
        ManualConfig {
            base_url: "https://www.lua.org/manual/5.1/manual.html".to_string(),
            encoding: Encoding::Latin1,
            separator_label: "hr".to_string(),
            prototype_label: "pre".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Encoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "latin1")]
    Latin1,
}

/// Raw-text splitting of manual sections.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    /// Literal marker between two entries.
    pub separator: String,
    pub squash_blank_lines: bool,
    pub regions: Vec<RegionConfig>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            separator: "<hr><h3><a name=".to_string(),
            squash_blank_lines: true,
            regions: Vec::new(),
        }
    }
}

/// A section bounded by two literal markers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// Ordered symbol names per category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymbolLists {
    pub types: Vec<String>,
    pub functions: Vec<String>,
    pub aux_types: Vec<String>,
    pub aux_functions: Vec<String>,
    pub constants: Vec<String>,
}

impl SymbolLists {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::OpaqueType => &self.types,
            Category::PrimaryFunction => &self.functions,
            Category::AuxiliaryType => &self.aux_types,
            Category::AuxiliaryFunction => &self.aux_functions,
            Category::Constant => &self.constants,
        }
    }
}

const DECL_TEMPLATE: &str = "///\n/// ```c\n/// ${prototype}\n/// ```\npub const ${name} = c.${name};";
const CONST_TEMPLATE: &str = "pub const ${name} = c.${name};";

/// Declaration templates per category.
///
/// Placeholders: `${name}`, `${prototype}`, `${link}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Templates {
    pub types: String,
    pub functions: String,
    pub aux_types: String,
    pub aux_functions: String,
    pub constants: String,
}

impl Templates {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::OpaqueType => &self.types,
            Category::PrimaryFunction => &self.functions,
            Category::AuxiliaryType => &self.aux_types,
            Category::AuxiliaryFunction => &self.aux_functions,
            Category::Constant => &self.constants,
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            types: DECL_TEMPLATE.to_string(),
            functions: DECL_TEMPLATE.to_string(),
            aux_types: DECL_TEMPLATE.to_string(),
            aux_functions: DECL_TEMPLATE.to_string(),
            constants: CONST_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Text emitted once before the Zig bindings.
    pub preamble: Option<String>,
}
