//! Ruby annotation engine.
//!
//! Scans text left to right and, at each char offset, takes the first of
//! three tiers that matches: a positional override whose literal text is
//! present, the longest dictionary key, or a single pass-through char.
//! The resulting spans partition the input exactly.
//!
//! Offsets and lengths are counted in chars (Unicode scalar values), which
//! is how overrides are authored against the source text.

mod matcher;
mod overrides;
mod phonetic;
mod report;
#[cfg(test)]
mod tests;

pub use overrides::{
    find_stale, lint, Override, OverrideBook, OverrideError, StaleOverride, StaleReason,
};
pub use phonetic::{to_phonetic, PhoneticOptions};
pub use report::{coverage, explain, Coverage, ExplainStep};

use serde::Serialize;
use tracing::debug_span;

use crate::dict::LookupTable;

use matcher::Matcher;

/// Which tier produced a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanSource {
    Override,
    Dictionary,
    PassThrough,
}

/// A base-text slice paired with its reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotatedSpan<'a> {
    /// Char offset of the span in the input.
    pub start: usize,
    /// Length in chars; never zero.
    pub len: usize,
    pub text: &'a str,
    /// Empty for pass-through spans.
    pub reading: &'a str,
    pub source: SpanSource,
}

impl AnnotatedSpan<'_> {
    pub fn is_annotated(&self) -> bool {
        !self.reading.is_empty()
    }
}

/// Annotate `text` with readings from `overrides` and `dict`.
///
/// Pure and infallible: unmatched text degrades to pass-through spans and
/// an empty input yields no spans.
pub fn annotate<'a, D>(
    text: &'a str,
    overrides: &'a [Override],
    dict: &'a D,
) -> Vec<AnnotatedSpan<'a>>
where
    D: LookupTable + ?Sized,
{
    let matcher = Matcher::new(text, overrides, dict);
    let _span = debug_span!(
        "annotate",
        chars = matcher.char_count(),
        overrides = overrides.len()
    )
    .entered();

    let mut spans = Vec::new();
    let mut i = 0;
    while i < matcher.char_count() {
        let step = matcher.step(i);
        spans.push(matcher.span(step));
        i += step.len;
    }
    spans
}
