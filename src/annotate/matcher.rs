use std::collections::HashMap;

use tracing::debug;

use super::{AnnotatedSpan, Override, SpanSource};
use crate::dict::LookupTable;

/// Byte offset of every char boundary in `text`, including `text.len()`.
pub(crate) fn char_bounds(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    bounds.push(text.len());
    bounds
}

/// One match produced at a char offset by the override → dictionary →
/// pass-through chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step<'a> {
    pub start: usize,
    pub len: usize,
    pub reading: &'a str,
    pub source: SpanSource,
    /// Index into the caller's override slice when `source` is `Override`.
    pub override_index: Option<usize>,
}

/// Shared matching core for annotation, phonetic conversion and the lint.
pub(crate) struct Matcher<'a, D: LookupTable + ?Sized> {
    text: &'a str,
    bounds: Vec<usize>,
    overrides: HashMap<usize, Vec<(usize, &'a Override)>>,
    dict: &'a D,
}

impl<'a, D: LookupTable + ?Sized> Matcher<'a, D> {
    pub(crate) fn new(text: &'a str, overrides: &'a [Override], dict: &'a D) -> Self {
        let mut by_position: HashMap<usize, Vec<(usize, &'a Override)>> = HashMap::new();
        for (index, o) in overrides.iter().enumerate() {
            by_position.entry(o.position).or_default().push((index, o));
        }
        Self {
            text,
            bounds: char_bounds(text),
            overrides: by_position,
            dict,
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Text of `len` chars starting at char offset `start`.
    pub(crate) fn slice(&self, start: usize, len: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[start + len]]
    }

    /// Text from char offset `start` to the end.
    pub(crate) fn rest(&self, start: usize) -> &'a str {
        &self.text[self.bounds[start]..]
    }

    pub(crate) fn char_at(&self, i: usize) -> Option<char> {
        self.rest(i).chars().next()
    }

    /// Pick the first tier that matches at `i`. Always advances by at least
    /// one char while `i < char_count()`.
    pub(crate) fn step(&self, i: usize) -> Step<'a> {
        self.override_at(i)
            .or_else(|| self.dictionary_at(i))
            .unwrap_or_else(|| self.pass_through(i))
    }

    pub(crate) fn span(&self, step: Step<'a>) -> AnnotatedSpan<'a> {
        AnnotatedSpan {
            start: step.start,
            len: step.len,
            text: self.slice(step.start, step.len),
            reading: step.reading,
            source: step.source,
        }
    }

    fn override_at(&self, i: usize) -> Option<Step<'a>> {
        let candidates = self.overrides.get(&i)?;
        let remaining = self.char_count() - i;
        for &(index, o) in candidates {
            let len = o.text.chars().count();
            if len > 0 && len <= remaining && self.slice(i, len) == o.text {
                return Some(Step {
                    start: i,
                    len,
                    reading: o.reading.as_str(),
                    source: SpanSource::Override,
                    override_index: Some(index),
                });
            }
            debug!(position = i, expected = %o.text, "override does not match text, skipped");
        }
        None
    }

    fn dictionary_at(&self, i: usize) -> Option<Step<'a>> {
        let dict: &'a D = self.dict;
        let remaining = self.char_count() - i;
        let m = dict
            .longest_match(self.rest(i))
            .filter(|m| m.chars > 0 && m.chars <= remaining)?;
        Some(Step {
            start: i,
            len: m.chars,
            reading: m.reading,
            source: SpanSource::Dictionary,
            override_index: None,
        })
    }

    fn pass_through(&self, i: usize) -> Step<'a> {
        Step {
            start: i,
            len: 1,
            reading: "",
            source: SpanSource::PassThrough,
            override_index: None,
        }
    }
}
