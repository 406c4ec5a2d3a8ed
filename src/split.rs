//! Raw-text splitting of manual sections into per-symbol fragments.
//!
//! Works purely on string offsets: a section is bounded by two literal
//! markers, its introductory prose is skipped up to the first separator,
//! and the rest is cut on every separator occurrence.

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::model::RawFragment;
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Locate the text between `start` and `end`, beginning just past the first
/// `separator` that follows `start`.
pub fn locate_region<'a>(
    text: &'a str,
    start: &str,
    end: &str,
    separator: &str,
) -> Result<&'a str> {
    let start_at = text.find(start).ok_or_else(|| missing(start))?;
    let after_start = &text[start_at..];

    let sep_at = after_start.find(separator).ok_or_else(|| missing(separator))?;
    let end_at = after_start.find(end).ok_or_else(|| missing(end))?;

    let body_at = sep_at + separator.len();
    if end_at < body_at {
        // The section closes before its first entry.
        return Err(missing(separator));
    }

    Ok(&after_start[body_at..end_at])
}

fn missing(marker: &str) -> Error {
    Error::MarkerNotFound {
        marker: marker.to_string(),
    }
}

/// Split a region on `separator`, keeping non-blank pieces in document order.
///
/// Every fragment is prefixed with the separator, including the first piece,
/// whose own marker was consumed by [`locate_region`].
pub fn split_definitions(region: &str, separator: &str) -> Vec<RawFragment> {
    region
        .split(separator)
        .filter(|piece| !piece.trim().is_empty())
        .map(|piece| format!("{separator}{piece}"))
        .collect()
}

/// Collapse every run of three or more newlines into a single newline.
pub fn squash_blank_runs(region: &str) -> String {
    RE_BLANK_RUN.replace_all(region, "\n").into_owned()
}

/// Locate and split every configured region, concatenated in config order.
pub fn split_manual(text: &str, config: &SplitConfig) -> Result<Vec<RawFragment>> {
    let mut fragments = Vec::new();
    for region in &config.regions {
        let body = locate_region(text, &region.start, &region.end, &config.separator)?;
        let before = fragments.len();
        if config.squash_blank_lines {
            fragments.extend(split_definitions(&squash_blank_runs(body), &config.separator));
        } else {
            fragments.extend(split_definitions(body, &config.separator));
        }
        tracing::debug!(
            region = %region.name,
            fragments = fragments.len() - before,
            "split region"
        );
    }
    Ok(fragments)
}

/// Write fragments as a pretty-printed JSON array of strings.
pub fn write_cache(path: &Path, fragments: &[RawFragment]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(fragments).context("failed to serialize fragments")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Load fragments previously written by [`write_cache`].
pub fn read_cache(path: &Path) -> anyhow::Result<Vec<RawFragment>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid fragment cache: {}", path.display()))
}
