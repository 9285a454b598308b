//! Text renderings of annotated spans.

use unicode_width::UnicodeWidthStr;

use crate::annotate::AnnotatedSpan;

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// HTML with one `<ruby>` element per annotated span. Pass-through text is
/// escaped and emitted as is.
pub fn ruby_html(spans: &[AnnotatedSpan<'_>]) -> String {
    let mut out = String::new();
    for span in spans {
        if span.is_annotated() {
            out.push_str("<ruby>");
            push_escaped(&mut out, span.text);
            out.push_str("<rt>");
            push_escaped(&mut out, span.reading);
            out.push_str("</rt></ruby>");
        } else {
            push_escaped(&mut out, span.text);
        }
    }
    out
}

/// Aozora Bunko ruby notation: `｜base《reading》`.
pub fn aozora(spans: &[AnnotatedSpan<'_>]) -> String {
    let mut out = String::new();
    for span in spans {
        if span.is_annotated() {
            out.push('｜');
            out.push_str(span.text);
            out.push('《');
            out.push_str(span.reading);
            out.push('》');
        } else {
            out.push_str(span.text);
        }
    }
    out
}

/// Reading line and base line for a terminal, each span padded to the
/// wider of its two halves.
pub fn aligned_lines(spans: &[AnnotatedSpan<'_>]) -> (String, String) {
    let mut top = String::new();
    let mut bottom = String::new();
    for span in spans {
        let reading_w = span.reading.width();
        let text_w = span.text.width();
        let cell = reading_w.max(text_w);
        top.push_str(span.reading);
        top.extend(std::iter::repeat(' ').take(cell - reading_w));
        bottom.push_str(span.text);
        bottom.extend(std::iter::repeat(' ').take(cell - text_w));
    }
    // Strip only the padding added above; U+3000 in the text stays.
    (
        top.trim_end_matches(' ').to_string(),
        bottom.trim_end_matches(' ').to_string(),
    )
}
