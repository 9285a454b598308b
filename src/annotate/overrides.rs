use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::matcher::{char_bounds, Matcher};
use crate::dict::LookupTable;

/// Use `reading` for `text` at char offset `position` instead of the
/// dictionary. Ignored when the text at `position` is not `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Override {
    pub position: usize,
    pub text: String,
    pub reading: String,
}

impl Override {
    pub fn new(position: usize, text: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            reading: reading.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Overrides grouped by content identifier (one list per displayed unit).
///
/// JSON shape: `{"lunyu-1-1": [{"position": 9, "text": "說", "reading": "よろこ"}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideBook {
    entries: BTreeMap<String, Vec<Override>>,
}

impl OverrideBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, OverrideError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn open(path: &Path) -> Result<Self, OverrideError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, OverrideError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Overrides for `id`; empty when the id is unknown.
    pub fn get(&self, id: &str) -> &[Override] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, id: impl Into<String>, overrides: Vec<Override>) {
        self.entries.insert(id.into(), overrides);
    }

    /// Content ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Why an override can never take effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StaleReason {
    EmptyText,
    OutOfRange { text_chars: usize },
    Mismatch { found: String },
    /// Text matches, but the scan never starts a span at this position
    /// (an earlier span covers it, or another override there wins).
    Shadowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleOverride<'a> {
    /// Index into the override slice that was checked.
    pub index: usize,
    #[serde(rename = "override")]
    pub entry: &'a Override,
    pub reason: StaleReason,
}

/// Check overrides against `text` alone: empty, out of range, or text
/// mismatch. The annotation engine skips these silently.
pub fn find_stale<'a>(text: &str, overrides: &'a [Override]) -> Vec<StaleOverride<'a>> {
    let bounds = char_bounds(text);
    let total = bounds.len() - 1;
    overrides
        .iter()
        .enumerate()
        .filter_map(|(index, o)| {
            let len = o.text.chars().count();
            let reason = if len == 0 {
                StaleReason::EmptyText
            } else if o.position.checked_add(len).map_or(true, |end| end > total) {
                StaleReason::OutOfRange { text_chars: total }
            } else {
                let found = &text[bounds[o.position]..bounds[o.position + len]];
                if found == o.text {
                    return None;
                }
                StaleReason::Mismatch {
                    found: found.to_string(),
                }
            };
            Some(StaleOverride {
                index,
                entry: o,
                reason,
            })
        })
        .collect()
}

/// `find_stale` plus overrides that match their text but are never applied
/// when annotating with `dict`.
pub fn lint<'a, D>(text: &str, overrides: &'a [Override], dict: &D) -> Vec<StaleOverride<'a>>
where
    D: LookupTable + ?Sized,
{
    let mut stale = find_stale(text, overrides);
    let broken: HashSet<usize> = stale.iter().map(|s| s.index).collect();

    let matcher = Matcher::new(text, overrides, dict);
    let mut applied = HashSet::new();
    let mut i = 0;
    while i < matcher.char_count() {
        let step = matcher.step(i);
        if let Some(index) = step.override_index {
            applied.insert(index);
        }
        i += step.len;
    }

    for (index, o) in overrides.iter().enumerate() {
        if !broken.contains(&index) && !applied.contains(&index) {
            stale.push(StaleOverride {
                index,
                entry: o,
                reason: StaleReason::Shadowed,
            });
        }
    }
    stale.sort_by_key(|s| s.index);
    stale
}
