use tracing::debug_span;

use super::matcher::Matcher;
use super::{Override, SpanSource};
use crate::dict::LookupTable;
use crate::settings::{KanaScript, PhoneticSettings};

/// Marker handling for `to_phonetic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticOptions {
    /// Tone-sandhi link between two characters; dropped from the output.
    pub connector: char,
    /// Explicit phrase boundary; replaced by `pause`.
    pub boundary: char,
    /// Emitted once for each run of boundary markers and whitespace.
    pub pause: String,
    pub script: KanaScript,
}

impl Default for PhoneticOptions {
    fn default() -> Self {
        Self {
            connector: '-',
            boundary: '|',
            pause: "、".to_string(),
            script: KanaScript::AsIs,
        }
    }
}

impl From<&PhoneticSettings> for PhoneticOptions {
    fn from(s: &PhoneticSettings) -> Self {
        Self {
            connector: s.connector,
            boundary: s.boundary,
            pause: s.pause.clone(),
            script: s.script,
        }
    }
}

/// Convert `text` to a flat reading string for narration.
///
/// Uses the same override → dictionary → pass-through chain as
/// [`annotate`](super::annotate), concatenating readings instead of pairing
/// them with base text. Unmatched characters are copied through.
pub fn to_phonetic<D>(
    text: &str,
    overrides: &[Override],
    dict: &D,
    options: &PhoneticOptions,
) -> String
where
    D: LookupTable + ?Sized,
{
    let matcher = Matcher::new(text, overrides, dict);
    let _span = debug_span!("to_phonetic", chars = matcher.char_count()).entered();

    let mut out = String::with_capacity(text.len());
    let mut in_pause = false;
    let mut i = 0;
    while let Some(c) = matcher.char_at(i) {
        if c == options.connector {
            i += 1;
            continue;
        }
        if c == options.boundary || c.is_whitespace() {
            if !in_pause {
                out.push_str(&options.pause);
                in_pause = true;
            }
            i += 1;
            continue;
        }

        let step = matcher.step(i);
        match step.source {
            SpanSource::PassThrough => out.push_str(matcher.slice(i, step.len)),
            SpanSource::Override | SpanSource::Dictionary => out.push_str(step.reading),
        }
        in_pause = false;
        i += step.len;
    }

    options.script.apply(&out)
}
