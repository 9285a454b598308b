use std::sync::OnceLock;

use super::config::parse_dict_toml;
use super::{DictError, ReadingDict};

pub(crate) const DEFAULT_READINGS_TOML: &str = include_str!("default_readings.toml");
pub(crate) const DEFAULT_GLOSSES_TOML: &str = include_str!("default_glosses.toml");

static CUSTOM_READINGS: OnceLock<String> = OnceLock::new();
static CUSTOM_GLOSSES: OnceLock<String> = OnceLock::new();

static READINGS: OnceLock<ReadingDict> = OnceLock::new();
static GLOSSES: OnceLock<ReadingDict> = OnceLock::new();

/// The two process-wide dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictKind {
    /// Text spans to kana readings.
    Readings,
    /// Characters and words to their default short meanings.
    Glosses,
}

impl DictKind {
    fn custom(self) -> &'static OnceLock<String> {
        match self {
            DictKind::Readings => &CUSTOM_READINGS,
            DictKind::Glosses => &CUSTOM_GLOSSES,
        }
    }

    fn instance(self) -> &'static OnceLock<ReadingDict> {
        match self {
            DictKind::Readings => &READINGS,
            DictKind::Glosses => &GLOSSES,
        }
    }

    fn default_toml(self) -> &'static str {
        match self {
            DictKind::Readings => DEFAULT_READINGS_TOML,
            DictKind::Glosses => DEFAULT_GLOSSES_TOML,
        }
    }
}

/// Install a custom TOML source for `kind` before the first `global(kind)` call.
pub fn init_custom(kind: DictKind, toml_content: String) -> Result<(), DictError> {
    // Validate eagerly
    parse_dict_toml(&toml_content)?;
    if kind.instance().get().is_some() {
        return Err(DictError::AlreadyInitialized(kind));
    }
    kind.custom()
        .set(toml_content)
        .map_err(|_| DictError::AlreadyInitialized(kind))
}

/// Get or initialize the process-wide dictionary for `kind`.
pub fn global(kind: DictKind) -> &'static ReadingDict {
    kind.instance().get_or_init(|| {
        let toml_str = kind
            .custom()
            .get()
            .map(|s| s.as_str())
            .unwrap_or(kind.default_toml());
        let entries = parse_dict_toml(toml_str).expect("dictionary TOML must be valid");
        tracing::debug!(?kind, entries = entries.len(), "dictionary loaded");
        ReadingDict::from_entries(entries)
    })
}
