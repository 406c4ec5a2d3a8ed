//! Error type shared by the splitter, extractor, registry and synthesizer.

use thiserror::Error;

/// Failures raised while turning the manual into bindings.
///
/// Region and decoding failures abort a run. Per-symbol failures
/// (`AnchorNotFound` through `MissingPrototype`) are collected by the
/// synthesizer and reported together.
#[derive(Debug, Error)]
pub enum Error {
    /// A start, end or separator marker is absent from the raw manual.
    #[error("marker not found in manual: {marker:?}")]
    MarkerNotFound { marker: String },

    /// No `<a name=...>` matches the symbol.
    #[error("no anchor named `{0}` in the manual")]
    AnchorNotFound(String),

    /// The symbol's anchor appears more than once.
    #[error("anchor `{name}` appears {count} times in the manual")]
    AmbiguousAnchor { name: String, count: usize },

    /// The anchor does not sit directly inside an `h1`..`h6` element.
    #[error("anchor `{name}` is inside <{parent}>, expected a heading")]
    MalformedHeading { name: String, parent: String },

    /// The walk ran out of siblings before reaching a terminator.
    #[error("section for `{0}` ends without a separator or heading")]
    UnterminatedSection(String),

    /// The category template needs a prototype but the section has none.
    #[error("no <pre> prototype found for `{0}`")]
    MissingPrototype(String),

    /// A symbol is listed more than once in the registry.
    #[error("symbol `{name}` is registered twice (in {first} and {second})")]
    DuplicateSymbol {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    /// The manual bytes are not valid in the configured encoding.
    #[error("manual is not valid {encoding}: {reason}")]
    Decode {
        encoding: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
