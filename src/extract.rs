//! Section extraction: prototype and prose for a single symbol.
//!
//! A symbol's entry starts at the heading holding its anchor and runs over
//! the heading's following siblings until one of them is a terminator: the
//! next heading at the same depth, a heading one level up (entries whose
//! separator was omitted before a section boundary), or the separator.

use crate::error::{Error, Result};
use crate::manual::Manual;
use crate::model::{ExtractionResult, SectionNode, TerminatorSet};

/// Anything that can produce an extraction result for a symbol name.
pub trait SectionSource {
    fn extract(&self, name: &str) -> Result<ExtractionResult>;
}

/// Walk `nodes` in order, taking the first `prototype_label` node as the
/// prototype and everything else as prose, up to the first terminator.
///
/// The terminator itself is not included. When the nodes run out first,
/// `terminator` is left as `None`.
pub fn walk_section<I>(nodes: I, terminators: &TerminatorSet, prototype_label: &str) -> ExtractionResult
where
    I: IntoIterator<Item = SectionNode>,
{
    let mut result = ExtractionResult::default();
    for node in nodes {
        if let Some(label) = node.label.as_deref() {
            if terminators.contains(label) {
                result.terminator = Some(label.to_string());
                break;
            }
        }
        if result.prototype.is_none() && node.has_label(prototype_label) {
            result.prototype = Some(node);
        } else {
            result.prose.push(node);
        }
    }
    result
}

impl SectionSource for Manual {
    fn extract(&self, name: &str) -> Result<ExtractionResult> {
        let heading = self.anchor_heading(name)?;
        let terminators = TerminatorSet::for_heading(heading.level, self.separator_label());
        let result = walk_section(heading.following_siblings(), &terminators, self.prototype_label());

        let Some(terminator) = result.terminator.as_deref() else {
            return Err(Error::UnterminatedSection(name.to_string()));
        };
        tracing::debug!(
            symbol = name,
            level = heading.level.get(),
            terminator,
            prose = result.prose.len(),
            has_prototype = result.prototype.is_some(),
            "extracted section"
        );
        Ok(result)
    }
}
