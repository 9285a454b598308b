//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the embedded dictionaries.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::unicode::{hiragana_to_katakana, katakana_to_hiragana};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub phonetic: PhoneticSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticSettings {
    pub connector: char,
    pub boundary: char,
    pub pause: String,
    #[serde(default)]
    pub script: KanaScript,
}

/// Kana script of the phonetic output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KanaScript {
    /// Keep readings as written in the dictionary.
    #[default]
    AsIs,
    Katakana,
    Hiragana,
}

impl KanaScript {
    pub fn apply(self, s: &str) -> String {
        match self {
            KanaScript::AsIs => s.to_string(),
            KanaScript::Katakana => hiragana_to_katakana(s),
            KanaScript::Hiragana => katakana_to_hiragana(s),
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_marker {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_whitespace() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be whitespace".to_string(),
                });
            }
        };
    }

    check_marker!(phonetic.connector);
    check_marker!(phonetic.boundary);
    if s.phonetic.connector == s.phonetic.boundary {
        return Err(SettingsError::InvalidValue {
            field: "phonetic.boundary".to_string(),
            reason: "must differ from phonetic.connector".to_string(),
        });
    }
    if s.phonetic.pause.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "phonetic.pause".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}
