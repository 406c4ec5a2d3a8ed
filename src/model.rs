//! Data model for extracted documentation, independent of the HTML library.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One symbol's raw markup, always starting with the separator marker.
pub type RawFragment = String;

/// Symbol category. Declaration order is generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    OpaqueType,
    PrimaryFunction,
    AuxiliaryType,
    AuxiliaryFunction,
    Constant,
}

impl Category {
    /// All categories in generation order.
    pub const ALL: [Category; 5] = [
        Category::OpaqueType,
        Category::PrimaryFunction,
        Category::AuxiliaryType,
        Category::AuxiliaryFunction,
        Category::Constant,
    ];

    /// Key used for this category in the `[symbols]` and `[templates]` tables.
    pub fn key(self) -> &'static str {
        match self {
            Category::OpaqueType => "types",
            Category::PrimaryFunction => "functions",
            Category::AuxiliaryType => "aux_types",
            Category::AuxiliaryFunction => "aux_functions",
            Category::Constant => "constants",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Nesting depth of an `h1`..`h6` heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(HeadingLevel(level))
    }

    /// Parse a heading label such as `h3`. Anything else is not a heading.
    pub fn from_label(label: &str) -> Option<Self> {
        let digits = label.strip_prefix('h')?;
        if digits.len() != 1 {
            return None;
        }
        digits.parse().ok().and_then(HeadingLevel::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn label(self) -> String {
        format!("h{}", self.0)
    }

    /// The enclosing level, or `None` for `h1`.
    pub fn shallower(self) -> Option<Self> {
        HeadingLevel::new(self.0 - 1)
    }
}

/// Node labels that end a symbol's content during the forward walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminatorSet {
    labels: BTreeSet<String>,
}

impl TerminatorSet {
    /// Same-level heading, one-level-shallower heading and the separator.
    pub fn for_heading(level: HeadingLevel, separator_label: &str) -> Self {
        let mut labels = BTreeSet::new();
        labels.insert(level.label());
        if let Some(parent) = level.shallower() {
            labels.insert(parent.label());
        }
        labels.insert(separator_label.to_string());
        TerminatorSet { labels }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// A sibling node materialized from the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionNode {
    /// Element tag name; `None` for text and comment nodes.
    pub label: Option<String>,
    /// Serialized markup of the node.
    pub markup: String,
    /// Text content with entities decoded.
    pub text: String,
}

impl SectionNode {
    pub fn element(label: &str, markup: impl Into<String>, text: impl Into<String>) -> Self {
        SectionNode {
            label: Some(label.to_string()),
            markup: markup.into(),
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        SectionNode {
            label: None,
            markup: text.clone(),
            text,
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }
}

/// Prototype and prose collected for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// First fixed-layout sibling after the heading.
    pub prototype: Option<SectionNode>,
    /// Every other visited sibling, in document order.
    pub prose: Vec<SectionNode>,
    /// Label of the node that stopped the walk, if one was reached.
    pub terminator: Option<String>,
}

/// Hand-written documentation that replaces extraction for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverrideEntry {
    pub prose: String,
    pub declaration: String,
}

/// One synthesized declaration with its documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub symbol: String,
    pub category: Category,
    pub doc: Vec<String>,
    pub declaration: String,
    pub link: String,
}
