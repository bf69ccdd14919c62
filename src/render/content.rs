//! Page content streams and PDF string encoding.

use unicode_normalization::UnicodeNormalization;

use crate::model::{Color, Page, TextRun};

/// Build the content stream for one page: a single text object with one
/// positioned show operation per run.
pub(crate) fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::with_capacity(64 + page.runs().len() * 48);
    out.extend_from_slice(b"BT\n");
    for run in page.runs() {
        write_run(&mut out, run);
    }
    out.extend_from_slice(b"ET\n");
    out
}

fn write_run(out: &mut Vec<u8>, run: &TextRun) {
    let x = format_number(run.x());
    let y = format_number(run.y());
    push_line(out, &format!("/F1 {} Tf", format_number(run.font_size())));
    push_line(out, &format!("{} {} Td", x, y));
    // fill color sits directly before the show operator
    push_line(out, &color_operator(run.color()));
    out.push(b'(');
    out.extend(escape_literal(&encode_text(run.text())));
    out.extend_from_slice(b") Tj\n");
    push_line(
        out,
        &format!("{} {} Td", format_number(-run.x()), format_number(-run.y())),
    );
}

fn push_line(out: &mut Vec<u8>, line: &str) {
    out.extend_from_slice(line.as_bytes());
    out.push(b'\n');
}

/// Non-stroking RGB fill operator.
pub(crate) fn color_operator(color: Color) -> String {
    if color.is_black() {
        "0 0 0 rg".to_string()
    } else {
        format!("{:.3} {:.3} {:.3} rg", color.r(), color.g(), color.b())
    }
}

/// Format a number for a PDF operand: at most two decimals, trailing zeros
/// trimmed, never an exponent, never `-0`.
pub(crate) fn format_number(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.2}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Encode text for the standard Helvetica font with WinAnsiEncoding.
///
/// Text is NFC-normalized first so decomposed accents map to their
/// precomposed Latin-1 forms. Characters outside the encoding become `?`.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    text.nfc().map(winansi_byte).collect()
}

fn winansi_byte(ch: char) -> u8 {
    match ch {
        '\u{0000}'..='\u{007F}' => ch as u8,
        '\u{00A0}'..='\u{00FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

/// Escape bytes for a PDF literal string.
pub(crate) fn escape_literal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b => out.push(b),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(742.0), "742");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(1.0 / 3.0), "0.33");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-50.0), "-50");
        assert_eq!(format_number(1.0e9), "1000000000");
        assert_eq!(format_number(f32::NAN), "0");
    }

    #[test]
    fn test_color_operator() {
        assert_eq!(color_operator(Color::BLACK), "0 0 0 rg");
        assert_eq!(color_operator(Color::RED), "1.000 0.000 0.000 rg");
        assert_eq!(color_operator(Color::GRAY), "0.500 0.500 0.500 rg");
    }

    #[test]
    fn test_escape_order() {
        assert_eq!(escape_literal(b"a\\b"), b"a\\\\b".to_vec());
        assert_eq!(escape_literal(b"(x)"), b"\\(x\\)".to_vec());
        assert_eq!(escape_literal(b"1\r\n2"), b"1\\r\\n2".to_vec());
        // the backslash produced by escaping a paren is not escaped again
        assert_eq!(escape_literal(b"\\("), b"\\\\\\(".to_vec());
    }

    #[test]
    fn test_encode_winansi() {
        assert_eq!(encode_text("Caf\u{e9}"), vec![b'C', b'a', b'f', 0xE9]);
        // decomposed e + combining acute normalizes to one byte
        assert_eq!(encode_text("Cafe\u{301}"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode_text("\u{20AC}5"), vec![0x80, b'5']);
        assert_eq!(encode_text("\u{4e2d}"), vec![b'?']);
    }

    #[test]
    fn test_content_stream_layout() {
        let mut page = Page::letter();
        page.add_colored_text("Hi (there)", 50.0, 742.0, 10.0, Color::RED)
            .unwrap();
        let stream = String::from_utf8(content_stream(&page)).unwrap();
        assert_eq!(
            stream,
            "BT\n/F1 10 Tf\n50 742 Td\n1.000 0.000 0.000 rg\n(Hi \\(there\\)) Tj\n-50 -742 Td\nET\n"
        );
    }

    #[test]
    fn test_empty_page_stream() {
        assert_eq!(content_stream(&Page::letter()), b"BT\nET\n".to_vec());
    }
}
