use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use super::config::parse_dict_toml;
use super::trie::CharTrie;
use super::{DictError, LookupTable, PrefixMatch};

const MAGIC: &[u8; 4] = b"KBDX";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 4; // magic + version + payload_len = 9

fn checked_payload_len(len: usize) -> Result<u32, DictError> {
    u32::try_from(len).map_err(|_| DictError::PayloadTooLarge(len))
}

/// Span-to-reading dictionary backed by a char trie.
pub struct ReadingDict {
    trie: CharTrie,
    keys: Vec<String>,
    readings: Vec<String>,
    max_key_chars: usize,
}

impl ReadingDict {
    /// Build from `(key, reading)` pairs. A later pair replaces an earlier
    /// one with the same key; pairs with an empty key or reading are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let map: BTreeMap<String, String> = entries
            .into_iter()
            .filter(|(key, reading)| !key.is_empty() && !reading.is_empty())
            .collect();

        let mut trie = CharTrie::new();
        let mut keys = Vec::with_capacity(map.len());
        let mut readings = Vec::with_capacity(map.len());
        let mut max_key_chars = 0;
        for (id, (key, reading)) in map.into_iter().enumerate() {
            trie.insert(&key, id as u32);
            max_key_chars = max_key_chars.max(key.chars().count());
            keys.push(key);
            readings.push(reading);
        }

        Self {
            trie,
            keys,
            readings,
            max_key_chars,
        }
    }

    /// Parse a TOML `[entries]` source.
    pub fn from_toml(toml_str: &str) -> Result<Self, DictError> {
        Ok(Self::from_entries(parse_dict_toml(toml_str)?))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let pairs: Vec<(&str, &str)> = self.iter().collect();
        let payload = bincode::serialize(&pairs).map_err(DictError::Serialize)?;
        let payload_len = checked_payload_len(payload.len())?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        let Some(len_bytes) = data.get(5..HEADER_SIZE) else {
            return Err(DictError::InvalidHeader);
        };
        let mut len_buf = [0u8; 4];
        len_buf.copy_from_slice(len_bytes);
        let payload_len = u32::from_le_bytes(len_buf) as usize;

        let Some(payload) = data.get(HEADER_SIZE..HEADER_SIZE + payload_len) else {
            return Err(DictError::InvalidHeader);
        };
        let pairs: Vec<(String, String)> =
            bincode::deserialize(payload).map_err(DictError::Deserialize)?;
        for (key, reading) in &pairs {
            if key.is_empty() {
                return Err(DictError::EmptyKey);
            }
            if reading.is_empty() {
                return Err(DictError::EmptyValue(key.clone()));
            }
        }
        Ok(Self::from_entries(pairs))
    }

    /// Open a compiled dictionary file through a read-only mapping.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is dropped
        // once the entries have been copied out below.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }

    /// Iterate `(key, reading)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.readings.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Length in characters of the longest key.
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    /// Returns (entry_count, multi_char_entry_count).
    pub fn stats(&self) -> (usize, usize) {
        let multi = self.keys.iter().filter(|k| k.chars().nth(1).is_some()).count();
        (self.keys.len(), multi)
    }

    fn prefix_match(&self, hit: (usize, usize, u32)) -> PrefixMatch<'_> {
        let (chars, bytes, id) = hit;
        PrefixMatch {
            chars,
            bytes,
            reading: self.readings[id as usize].as_str(),
        }
    }
}

impl LookupTable for ReadingDict {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.trie
            .exact_match(key)
            .map(|id| self.readings[id as usize].as_str())
    }

    fn longest_match(&self, text: &str) -> Option<PrefixMatch<'_>> {
        self.trie
            .prefixes(text)
            .last()
            .map(|hit| self.prefix_match(hit))
    }

    fn common_prefix_search(&self, text: &str) -> Vec<PrefixMatch<'_>> {
        self.trie
            .prefixes(text)
            .map(|hit| self.prefix_match(hit))
            .collect()
    }
}
