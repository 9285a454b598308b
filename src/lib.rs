//! Ruby annotation and phonetic conversion for classical Chinese texts read
//! in Japanese.
//!
//! ```
//! use kanbun_engine::annotate::{annotate, Override};
//! use kanbun_engine::dict::{global, DictKind};
//!
//! let overrides = vec![Override::new(9, "說", "よろこ")];
//! let spans = annotate("子曰學而時習之不亦說乎", &overrides, global(DictKind::Readings));
//! assert_eq!(spans[0].text, "子曰");
//! assert_eq!(spans[0].reading, "しいわく");
//! assert!(spans.iter().any(|s| s.text == "說" && s.reading == "よろこ"));
//! ```

pub mod annotate;
pub mod dict;
pub mod render;
pub mod settings;
pub mod trace_init;
pub mod unicode;
