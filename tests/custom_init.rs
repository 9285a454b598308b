//! Custom sources installed before first use. Runs in its own process so
//! the process-wide singletons start empty; each test touches different ones.

use kanbun_engine::annotate::{to_phonetic, PhoneticOptions};
use kanbun_engine::dict::{self, DictError, DictKind, LookupTable};
use kanbun_engine::settings::{self, KanaScript};

const CUSTOM_SETTINGS: &str = r#"
[phonetic]
connector = "~"
boundary = "/"
pause = "。"
script = "katakana"
"#;

const CUSTOM_READINGS: &str = r#"
[entries]
"學" = "まな"
"而" = "じ"
"時習" = "じしゅう"
"#;

#[test]
fn test_custom_settings_and_readings_drive_phonetic() {
    settings::init_custom(CUSTOM_SETTINGS.to_string()).unwrap();
    dict::init_custom(DictKind::Readings, CUSTOM_READINGS.to_string()).unwrap();

    let s = settings::settings();
    assert_eq!(s.phonetic.connector, '~');
    assert_eq!(s.phonetic.boundary, '/');
    assert_eq!(s.phonetic.script, KanaScript::Katakana);

    let readings = dict::global(DictKind::Readings);
    assert_eq!(readings.len(), 3);
    assert_eq!(readings.lookup("學"), Some("まな"));
    // Embedded defaults are replaced, not merged.
    assert_eq!(readings.lookup("子曰"), None);

    let options = PhoneticOptions::from(&s.phonetic);
    assert_eq!(to_phonetic("學~而/時習", &[], readings, &options), "マナジ。ジシュウ");

    assert!(matches!(
        settings::init_custom(CUSTOM_SETTINGS.to_string()),
        Err(settings::SettingsError::AlreadyInitialized)
    ));
}

#[test]
fn test_custom_glosses() {
    let toml = "[entries]\n\"仁\" = \"なさけ\"\n".to_string();
    dict::init_custom(DictKind::Glosses, toml.clone()).unwrap();

    let glosses = dict::global(DictKind::Glosses);
    assert_eq!(glosses.lookup("仁"), Some("なさけ"));
    assert_eq!(glosses.len(), 1);

    let err = dict::init_custom(DictKind::Glosses, toml).unwrap_err();
    assert!(matches!(err, DictError::AlreadyInitialized(DictKind::Glosses)));
}
