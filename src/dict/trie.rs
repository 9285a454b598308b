use std::collections::HashMap;

struct Node {
    children: HashMap<char, Node>,
    value: Option<u32>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Char-keyed trie; values are indices into the owner's reading table.
pub(super) struct CharTrie {
    root: Node,
}

impl CharTrie {
    pub(super) fn new() -> Self {
        Self { root: Node::new() }
    }

    pub(super) fn insert(&mut self, key: &str, value: u32) {
        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
        }
        node.value = Some(value);
    }

    pub(super) fn exact_match(&self, key: &str) -> Option<u32> {
        let mut node = &self.root;
        for c in key.chars() {
            node = node.children.get(&c)?;
        }
        node.value
    }

    /// Walk `text` from its start, yielding `(chars, bytes, value)` for
    /// every node on the path that carries a value.
    pub(super) fn prefixes<'t>(
        &'t self,
        text: &'t str,
    ) -> impl Iterator<Item = (usize, usize, u32)> + 't {
        let mut node = Some(&self.root);
        text.char_indices()
            .enumerate()
            .map_while(move |(n, (offset, c))| {
                let child = node?.children.get(&c)?;
                node = Some(child);
                Some(child.value.map(|v| (n + 1, offset + c.len_utf8(), v)))
            })
            .flatten()
    }
}
