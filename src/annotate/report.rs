use serde::Serialize;

use super::matcher::Matcher;
use super::{AnnotatedSpan, Override};
use crate::dict::{LookupTable, PrefixMatch};
use crate::unicode::is_kanji;

/// How much of a text received a reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub total_chars: usize,
    pub annotated_chars: usize,
    /// Kanji left without a reading, unique, in order of first appearance.
    pub unannotated_kanji: Vec<char>,
}

impl Coverage {
    /// Annotated share of all chars, 1.0 for an empty text.
    pub fn ratio(&self) -> f64 {
        if self.total_chars == 0 {
            1.0
        } else {
            self.annotated_chars as f64 / self.total_chars as f64
        }
    }
}

pub fn coverage(spans: &[AnnotatedSpan<'_>]) -> Coverage {
    let mut report = Coverage::default();
    for span in spans {
        report.total_chars += span.len;
        if span.is_annotated() {
            report.annotated_chars += span.len;
            continue;
        }
        for c in span.text.chars().filter(|&c| is_kanji(c)) {
            if !report.unannotated_kanji.contains(&c) {
                report.unannotated_kanji.push(c);
            }
        }
    }
    report
}

/// A chosen span with every dictionary key that matched at its start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainStep<'a> {
    pub span: AnnotatedSpan<'a>,
    /// Shortest first; the dictionary tier takes the last one.
    pub candidates: Vec<PrefixMatch<'a>>,
}

/// Annotate and keep, for each span, the alternatives greedy matching
/// passed over.
pub fn explain<'a, D>(text: &'a str, overrides: &'a [Override], dict: &'a D) -> Vec<ExplainStep<'a>>
where
    D: LookupTable + ?Sized,
{
    let matcher = Matcher::new(text, overrides, dict);
    let mut steps = Vec::new();
    let mut i = 0;
    while i < matcher.char_count() {
        let step = matcher.step(i);
        steps.push(ExplainStep {
            span: matcher.span(step),
            candidates: dict.common_prefix_search(matcher.rest(i)),
        });
        i += step.len;
    }
    steps
}
