use super::make_dict;
use crate::annotate::{annotate, AnnotatedSpan, Override, SpanSource};
use crate::dict::{global, DictKind};

fn summary<'a>(spans: &[AnnotatedSpan<'a>]) -> Vec<(&'a str, &'a str)> {
    spans.iter().map(|s| (s.text, s.reading)).collect()
}

#[test]
fn test_empty_text() {
    let dict = make_dict(&[("學", "がく")]);
    assert!(annotate("", &[], &dict).is_empty());
}

#[test]
fn test_longest_match_wins() {
    let dict = make_dict(&[("學", "がく"), ("學而", "がくじ")]);
    let spans = annotate("學而時", &[], &dict);
    assert_eq!(summary(&spans), vec![("學而", "がくじ"), ("時", "")]);
    assert_eq!(spans[0].len, 2);
    assert_eq!(spans[0].source, SpanSource::Dictionary);
    assert_eq!(spans[1].start, 2);
    assert_eq!(spans[1].source, SpanSource::PassThrough);
}

#[test]
fn test_override_precedence() {
    let dict = make_dict(&[("惡", "あく")]);
    let overrides = vec![Override::new(0, "惡", "お")];

    let spans = annotate("惡", &overrides, &dict);
    assert_eq!(summary(&spans), vec![("惡", "お")]);
    assert_eq!(spans[0].source, SpanSource::Override);

    let spans = annotate("是以君子惡", &overrides, &dict);
    assert_eq!(spans[4].start, 4);
    assert_eq!((spans[4].text, spans[4].reading), ("惡", "あく"));
}

#[test]
fn test_override_at_later_position() {
    let dict = make_dict(&[("惡", "あく")]);
    let overrides = vec![Override::new(5, "惡", "お")];
    let spans = annotate("惡不仁者其惡", &overrides, &dict);
    assert_eq!(spans[0].reading, "あく");
    assert_eq!(spans[5].reading, "お");
}

#[test]
fn test_override_mismatch_falls_through() {
    let dict = make_dict(&[("樂", "らく")]);
    let overrides = vec![Override::new(0, "惡", "お")];
    let spans = annotate("樂", &overrides, &dict);
    assert_eq!(summary(&spans), vec![("樂", "らく")]);
    assert_eq!(spans[0].source, SpanSource::Dictionary);

    let empty = make_dict(&[]);
    let spans = annotate("樂", &overrides, &empty);
    assert_eq!(summary(&spans), vec![("樂", "")]);
    assert_eq!(spans[0].source, SpanSource::PassThrough);
}

#[test]
fn test_override_inside_dictionary_span() {
    let dict = make_dict(&[("不亦說乎", "ふえきえつこ")]);
    let overrides = vec![Override::new(2, "說", "よろこ")];
    let spans = annotate("不亦說乎", &overrides, &dict);
    // The dictionary span starting at 0 covers position 2, so the override
    // is never reached.
    assert_eq!(summary(&spans), vec![("不亦說乎", "ふえきえつこ")]);

    let overrides = vec![Override::new(0, "不亦", "ふえき")];
    let spans = annotate("不亦說乎", &overrides, &dict);
    assert_eq!(summary(&spans), vec![("不亦", "ふえき"), ("說", ""), ("乎", "")]);
}

#[test]
fn test_multi_char_override() {
    let dict = make_dict(&[("人", "じん"), ("知", "ち")]);
    let overrides = vec![Override::new(0, "人不知", "ひとしらず")];
    let spans = annotate("人不知而不慍", &overrides, &dict);
    assert_eq!(spans[0].len, 3);
    assert_eq!(spans[0].reading, "ひとしらず");
    assert_eq!(spans[1].start, 3);
}

#[test]
fn test_unsorted_overrides() {
    let dict = make_dict(&[]);
    let overrides = vec![
        Override::new(2, "時", "とき"),
        Override::new(0, "學", "まなぶ"),
    ];
    let spans = annotate("學而時", &overrides, &dict);
    assert_eq!(
        summary(&spans),
        vec![("學", "まなぶ"), ("而", ""), ("時", "とき")]
    );
}

#[test]
fn test_pass_through_non_target_script() {
    let dict = make_dict(&[]);
    let spans = annotate("Hello", &[], &dict);
    assert_eq!(spans.len(), 5);
    for (i, span) in spans.iter().enumerate() {
        assert_eq!(span.start, i);
        assert_eq!(span.len, 1);
        assert_eq!(span.reading, "");
        assert!(!span.is_annotated());
    }
    let text: String = spans.iter().map(|s| s.text).collect();
    assert_eq!(text, "Hello");
}

#[test]
fn test_punctuation_between_matches() {
    let dict = make_dict(&[("子曰", "しいわく"), ("學而", "がくじ")]);
    let spans = annotate("子曰、「學而」", &[], &dict);
    assert_eq!(
        summary(&spans),
        vec![
            ("子曰", "しいわく"),
            ("、", ""),
            ("「", ""),
            ("學而", "がくじ"),
            ("」", "")
        ]
    );
}

#[test]
fn test_deterministic() {
    let dict = global(DictKind::Readings);
    let overrides = vec![Override::new(9, "說", "よろこ")];
    let text = "子曰學而時習之不亦說乎";
    assert_eq!(
        annotate(text, &overrides, dict),
        annotate(text, &overrides, dict)
    );
}

#[test]
fn test_default_dictionary_first_passage() {
    let dict = global(DictKind::Readings);
    let spans = annotate("有朋自遠方來不亦樂乎", &[], dict);
    assert_eq!(
        summary(&spans),
        vec![
            ("有朋", "ゆうほう"),
            ("自", "じ"),
            ("遠方", "えんぽう"),
            ("來", "らい"),
            ("不", "ふ"),
            ("亦", "えき"),
            ("樂", "らく"),
            ("乎", "こ"),
        ]
    );
}

#[test]
fn test_glosses_dictionary() {
    let dict = global(DictKind::Glosses);
    let spans = annotate("君子不器", &[], dict);
    assert_eq!(spans[0].text, "君子");
    assert_eq!(spans[0].reading, "りっぱな人");
    assert_eq!(spans[1].reading, "ず");
    assert_eq!(spans[2].source, SpanSource::PassThrough);
}

#[test]
fn test_shared_across_threads() {
    let dict = global(DictKind::Readings);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                annotate("巧言令色鮮矣仁", &[], dict)
                    .iter()
                    .map(|s| s.reading.to_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), vec!["こうげんれいしょく", "せん", "い", "じん"]);
    }
}
