//! Word wrapping of logical lines into display rows.
//!
//! Rows are returned as byte ranges into the original text so search
//! matches can be mapped onto the row that displays them.

use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Split `text` into rows no wider than `width` display columns.
///
/// Rows break after the last whitespace that fits; a word longer than the
/// row is broken hard. Trailing whitespace is trimmed from every row and
/// leading whitespace is dropped from continuation rows. Always returns at
/// least one row, and every row except an empty line's holds at least one
/// char even if that char is wider than `width`.
pub fn wrap_line(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut start = 0;

    while start < text.len() {
        if !rows.is_empty() {
            let rest = &text[start..];
            start += rest.len() - rest.trim_start().len();
            if start >= text.len() {
                break;
            }
        }

        let mut column = 0;
        let mut end = start;
        let mut last_break = None;
        let mut overflow_at_whitespace = None;

        for (offset, ch) in text[start..].char_indices() {
            let char_width = ch.width().unwrap_or(0);
            if column + char_width > width && end > start {
                overflow_at_whitespace = Some(ch.is_whitespace());
                break;
            }
            if ch.is_whitespace() {
                last_break = Some(start + offset);
            }
            column += char_width;
            end = start + offset + ch.len_utf8();
        }

        let cut = match (overflow_at_whitespace, last_break) {
            (None, _) | (Some(true), _) => end,
            (Some(false), Some(at)) if !text[start..at].trim().is_empty() => at,
            (Some(false), _) => end,
        };

        let trimmed = text[start..cut].trim_end().len();
        rows.push(start..start + trimmed);
        start = cut;
    }

    if rows.is_empty() {
        rows.push(0..0);
    }
    rows
}
