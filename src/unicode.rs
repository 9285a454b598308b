//! Character-level Unicode classification for Chinese and Japanese text.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// CJK Unified Ideographs, Extension A, Extension B and the compatibility
/// block (several Analects editions use compatibility forms).
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
}

/// Hiragana letters and iteration marks that have a katakana twin at +0x60.
fn has_katakana_twin(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c) || c == 'ゝ' || c == 'ゞ'
}

/// Convert hiragana to katakana. Other characters (ー, kanji, ASCII, ...)
/// are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if has_katakana_twin(c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert katakana to hiragana. ヷ-ヺ and ー have no hiragana twin and are
/// kept.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            let shifted = char::from_u32((c as u32).wrapping_sub(0x60));
            match shifted {
                Some(h) if is_katakana(c) && has_katakana_twin(h) => h,
                _ => c,
            }
        })
        .collect()
}
