//! Width-based word wrapping.

use super::options::avg_char_width;
use crate::error::{Error, Result};

/// Wrap `text` so that no line is wider than `max_width` at `font_size`.
///
/// Width is estimated from a fixed average character width, so the budget is
/// a character count: `max(1, floor(max_width / (font_size * 0.5)))`.
/// Explicit line breaks split paragraphs; words longer than the budget are
/// broken. Empty text yields no lines.
///
/// # Example
/// ```
/// use sheetpdf::layout::wrap_text;
///
/// let lines = wrap_text("alpha beta gamma", 50.0, 10.0).unwrap();
/// assert_eq!(lines, vec!["alpha beta", "gamma"]);
/// ```
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Result<Vec<String>> {
    if max_width <= 0.0 || !max_width.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "wrap width must be positive, got {}",
            max_width
        )));
    }
    if font_size <= 0.0 || !font_size.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "font size must be positive, got {}",
            font_size
        )));
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let budget = ((max_width / avg_char_width(font_size)).floor() as usize).max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, budget, &mut lines);
    }
    Ok(lines)
}

/// Greedy fill of one paragraph; a blank paragraph keeps its line.
fn wrap_paragraph(paragraph: &str, budget: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut pushed = false;

    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        let mut chars: Vec<char> = word.chars().collect();

        // Oversized words are broken into budget-sized chunks.
        while chars.len() > budget {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(budget);
            lines.push(chars.into_iter().collect());
            pushed = true;
            chars = rest;
        }
        if chars.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            chars.len()
        } else {
            current_len + 1 + chars.len()
        };
        if needed > budget {
            lines.push(std::mem::take(&mut current));
            pushed = true;
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 || !pushed {
        lines.push(current);
    }
}
