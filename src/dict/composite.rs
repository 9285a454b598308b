use std::sync::Arc;

use super::{LookupTable, PrefixMatch};

/// A lookup table that stacks several layers.
///
/// Layers are searched in order; later layers have higher priority, so a
/// per-work supplement can sit on top of the shared dictionary. The longest
/// match across all layers wins; on equal length the later layer wins.
pub struct CompositeDictionary {
    layers: Vec<Arc<dyn LookupTable>>,
}

impl CompositeDictionary {
    pub fn new(layers: Vec<Arc<dyn LookupTable>>) -> Self {
        Self { layers }
    }
}

impl LookupTable for CompositeDictionary {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.layers.iter().rev().find_map(|layer| layer.lookup(key))
    }

    fn longest_match(&self, text: &str) -> Option<PrefixMatch<'_>> {
        let mut best: Option<PrefixMatch<'_>> = None;
        for layer in &self.layers {
            if let Some(m) = layer.longest_match(text) {
                if best.map_or(true, |b| m.chars >= b.chars) {
                    best = Some(m);
                }
            }
        }
        best
    }

    fn common_prefix_search(&self, text: &str) -> Vec<PrefixMatch<'_>> {
        let mut all: Vec<PrefixMatch<'_>> = Vec::new();
        for layer in &self.layers {
            for m in layer.common_prefix_search(text) {
                match all.iter_mut().find(|e| e.chars == m.chars) {
                    Some(existing) => *existing = m,
                    None => all.push(m),
                }
            }
        }
        all.sort_by_key(|m| m.chars);
        all
    }
}
