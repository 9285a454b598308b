use std::collections::BTreeMap;

use serde::Deserialize;

use super::DictError;

#[derive(Deserialize)]
struct DictSource {
    entries: BTreeMap<String, String>,
}

/// Parse TOML text into a sorted `BTreeMap<key, reading>`.
pub fn parse_dict_toml(toml_str: &str) -> Result<BTreeMap<String, String>, DictError> {
    let source: DictSource =
        toml::from_str(toml_str).map_err(|e| DictError::Parse(e.to_string()))?;

    if source.entries.is_empty() {
        return Err(DictError::Empty);
    }

    for (key, reading) in &source.entries {
        if key.is_empty() {
            return Err(DictError::EmptyKey);
        }
        if reading.is_empty() {
            return Err(DictError::EmptyValue(key.clone()));
        }
    }

    Ok(source.entries)
}
