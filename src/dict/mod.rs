//! Reading dictionaries.
//!
//! `ReadingDict` maps text spans (one or more characters) to a single
//! reading and answers longest-prefix queries through a char trie.
//! `CompositeDictionary` stacks several tables. Two process-wide
//! dictionaries are embedded: kana readings and default glosses.

mod composite;
mod config;
mod global;
mod reading_dict;
mod trie;

pub use composite::CompositeDictionary;
pub use config::parse_dict_toml;
pub use global::{global, init_custom, DictKind};
pub use reading_dict::ReadingDict;

use std::io;

/// Error type for dictionary sources (TOML) and compiled files (KBDX).
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected KBDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("payload too large for the header: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("[entries] table is empty")]
    Empty,

    #[error("empty key")]
    EmptyKey,

    #[error("empty reading for key: {0}")]
    EmptyValue(String),

    #[error("{0:?} dictionary already initialized")]
    AlreadyInitialized(DictKind),
}

/// A dictionary hit anchored at the start of the queried text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    /// Matched key length in characters.
    pub chars: usize,
    /// Matched key length in bytes.
    pub bytes: usize,
    pub reading: &'a str,
}

/// Read-only lookup shared by the annotation engine and its callers.
pub trait LookupTable: Send + Sync {
    /// Exact lookup of a whole key.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Longest key that is a prefix of `text`.
    fn longest_match(&self, text: &str) -> Option<PrefixMatch<'_>>;

    /// Every key that is a prefix of `text`, shortest first.
    fn common_prefix_search(&self, text: &str) -> Vec<PrefixMatch<'_>>;
}
