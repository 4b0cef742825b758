//! Display-width text wrapping for grid cells.
//!
//! Catalog text is CJK-heavy, so wrapping counts terminal columns via
//! `unicode-width`, never bytes or chars.

use unicode_width::UnicodeWidthChar;

/// Break `text` into lines of at most `max_cols` display columns.
/// Returns no lines for blank input. A single char wider than the
/// limit still gets a line of its own.
pub fn wrap(text: &str, max_cols: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut cols = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if cols + w > max_cols && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            cols = 0;
        }
        line.push(ch);
        cols += w;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
