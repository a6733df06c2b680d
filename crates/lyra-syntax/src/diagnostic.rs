//! Parse diagnostics and source-excerpt rendering.
//!
//! A [`Diagnostic`] records one non-fatal problem the parser found: a
//! message and the byte offset and width of the offending span. Rendering a
//! diagnostic against the source produces a line-numbered excerpt with the
//! span highlighted and the message echoed below — pure formatting, with no
//! effect on the parse result.

use std::fmt;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// One non-fatal problem found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable description, e.g. `expected =; found name`.
    pub message: String,
    /// Byte offset of the offending span in the source buffer.
    pub offset: usize,
    /// Width of the offending span in bytes, at least 1.
    pub width: usize,
}

impl Diagnostic {
    /// Converts this diagnostic's byte offset to a 1-based line and column.
    #[must_use]
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        offset_to_line_col(source, self.offset)
    }

    /// Renders this diagnostic as a source excerpt via [`render_excerpt`],
    /// with four lines of leading context.
    #[must_use]
    pub fn render(&self, source: &str, use_colors: bool) -> String {
        let (line, col) = self.line_col(source);
        render_excerpt(source, line, col, self.width, &self.message, 4, use_colors)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

/// Maps a byte offset to a 1-based (line, column) pair.
#[must_use]
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for &byte in source.as_bytes().iter().take(offset) {
        if byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Renders a line-numbered excerpt of `source` around 1-based
/// `line`/`col`, highlighting `width` bytes, with the message and an echoed
/// location below. Shows up to `context_lines` lines ending at the
/// offending one.
#[must_use]
pub fn render_excerpt(
    source: &str,
    line: usize,
    col: usize,
    width: usize,
    message: &str,
    context_lines: usize,
    use_colors: bool,
) -> String {
    let width = width.max(1);
    let (red, reset) = if use_colors { (RED, RESET) } else { ("", "") };

    let lines: Vec<&str> = source.split('\n').collect();
    let last = line.min(lines.len());
    let first = (last + 1).saturating_sub(context_lines).max(1);

    let mut out = String::new();
    let mut gutter_width = 0;

    for number in first..=last {
        let gutter = format!("{number}| ");
        gutter_width = gutter.len() - 1;
        out.push_str(&gutter);

        let text = lines[number - 1].trim_end_matches('\0');
        if number == line {
            // Highlight the offending span within its line.
            let start = (col - 1).min(text.len());
            let stop = (start + width).min(text.len());
            out.push_str(&text[..start]);
            out.push_str(red);
            out.push_str(&text[start..stop]);
            out.push_str(reset);
            out.push_str(&text[stop..]);
        } else {
            out.push_str(text);
        }
        out.push('\n');
    }

    let pad = " ".repeat(gutter_width + col);
    out.push_str(&pad);
    for _ in 0..width {
        out.push('^');
    }
    out.push('\n');
    out.push_str(&format!("{pad}{red}{message}{reset}\n"));
    out.push_str(&format!("{pad}{red}line: {line} pos: {col}{reset}"));
    out
}
