//! Property-based tests for the span partition invariants.
//!
//! Generates random texts over a small alphabet (so dictionary keys and
//! overrides actually match) and checks that the output always covers the
//! input exactly, in order, with no empty spans.

use proptest::prelude::*;

use super::make_dict;
use crate::annotate::{annotate, to_phonetic, Override, PhoneticOptions, SpanSource};

fn arb_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        '學', '而', '時', '習', '之', '不', '亦', '說', '乎', 'a', '、', ' ', '-', '|',
    ])
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 0..40).prop_map(|cs| cs.into_iter().collect())
}

fn arb_override() -> impl Strategy<Value = Override> {
    (
        0usize..45,
        prop::collection::vec(arb_char(), 0..3),
        "[あ-ん]{1,3}",
    )
        .prop_map(|(position, cs, reading)| {
            Override::new(position, cs.into_iter().collect::<String>(), reading)
        })
}

fn test_dict() -> crate::dict::ReadingDict {
    make_dict(&[
        ("學", "がく"),
        ("學而", "がくじ"),
        ("學而時習", "がくじじしゅう"),
        ("時習", "じしゅう"),
        ("之", "し"),
        ("不", "ふ"),
        ("不亦", "ふえき"),
        ("說乎", "えつこ"),
    ])
}

proptest! {
    #[test]
    fn spans_partition_text(
        text in arb_text(),
        overrides in prop::collection::vec(arb_override(), 0..6),
    ) {
        let dict = test_dict();
        let spans = annotate(&text, &overrides, &dict);

        let rebuilt: String = spans.iter().map(|s| s.text).collect();
        prop_assert_eq!(&rebuilt, &text);

        let mut expected_start = 0;
        for span in &spans {
            prop_assert!(span.len > 0);
            prop_assert_eq!(span.start, expected_start);
            prop_assert_eq!(span.text.chars().count(), span.len);
            if span.source == SpanSource::PassThrough {
                prop_assert_eq!(span.len, 1);
                prop_assert_eq!(span.reading, "");
            }
            expected_start += span.len;
        }
        prop_assert_eq!(expected_start, text.chars().count());
    }

    #[test]
    fn annotate_is_deterministic(
        text in arb_text(),
        overrides in prop::collection::vec(arb_override(), 0..6),
    ) {
        let dict = test_dict();
        prop_assert_eq!(
            annotate(&text, &overrides, &dict),
            annotate(&text, &overrides, &dict)
        );
        let options = PhoneticOptions::default();
        prop_assert_eq!(
            to_phonetic(&text, &overrides, &dict, &options),
            to_phonetic(&text, &overrides, &dict, &options)
        );
    }

    #[test]
    fn override_spans_match_declared_text(
        text in arb_text(),
        overrides in prop::collection::vec(arb_override(), 0..6),
    ) {
        let dict = test_dict();
        for span in annotate(&text, &overrides, &dict) {
            if span.source == SpanSource::Override {
                prop_assert!(overrides.iter().any(|o| o.position == span.start
                    && o.text == span.text
                    && o.reading == span.reading));
            }
        }
    }

    #[test]
    fn phonetic_has_no_markers_or_whitespace(text in arb_text()) {
        let dict = test_dict();
        let out = to_phonetic(&text, &[], &dict, &PhoneticOptions::default());
        prop_assert!(!out.contains('-'));
        prop_assert!(!out.contains('|'));
        prop_assert!(!out.chars().any(char::is_whitespace));
        prop_assert!(!out.contains("、、") || text.contains("、"));
    }
}
