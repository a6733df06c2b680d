//! Lexical analysis for Lyra source text.
//!
//! [`read_token`] is a pure function from a cursor position to the next
//! token kind and the position after it; the parser owns the cursor. The
//! input buffer must end with a NUL sentinel byte whose position is passed
//! as `end`: every scanning loop stops on NUL, which elides almost all
//! end-of-buffer comparisons, and the sentinel position distinguishes true
//! end of input from a stray NUL byte embedded in the text (which lexes as
//! an [`TreeKind::Error`] token instead).
//!
//! Classification is greedy longest-match per class, first matching class
//! wins. Every rule advances past its full lexeme; the error rule advances
//! exactly one byte, so repeated calls always make progress.

use crate::tree::TreeKind;

/// Reads one token starting at `pos`.
///
/// `source[end]` must be the NUL sentinel. Returns the token kind and the
/// position of the byte after the lexeme; for [`TreeKind::End`] the cursor
/// is returned unchanged so further calls keep yielding `End`.
#[must_use]
pub fn read_token(source: &[u8], pos: usize, end: usize) -> (TreeKind, usize) {
    debug_assert_eq!(source[end], 0, "input must end with a NUL sentinel");

    let c = source[pos];
    let mut p = pos + 1;

    // The sentinel itself. A NUL before `end` falls through to the error
    // rule below.
    if c == 0 && pos == end {
        return (TreeKind::End, pos);
    }

    // [\t\n\r ]+
    if matches!(c, b'\t' | b'\n' | b'\r' | b' ') {
        while matches!(source[p], b'\t' | b'\n' | b'\r' | b' ') {
            p += 1;
        }
        return (TreeKind::Space, p);
    }

    // "([^"\n]|\\")*" — an unterminated literal runs to the newline or the
    // sentinel without consuming a closing quote.
    if c == b'"' {
        while source[p] != 0 && source[p] != b'\n' && source[p] != b'"' {
            if source[p] == b'\\' && source[p + 1] == b'"' {
                p += 1;
            }
            p += 1;
        }
        if source[p] == b'"' {
            p += 1;
        }
        return (TreeKind::String, p);
    }

    // #.*\n
    if c == b'#' {
        while source[p] != 0 && source[p] != b'\n' {
            p += 1;
        }
        if source[p] == b'\n' {
            p += 1;
        }
        return (TreeKind::Comment, p);
    }

    match c {
        b'(' => return (TreeKind::LeftParen, p),
        b')' => return (TreeKind::RightParen, p),
        b'*' => return (TreeKind::Star, p),
        b'+' => return (TreeKind::Plus, p),
        b',' => return (TreeKind::Comma, p),
        b'-' => return (TreeKind::Minus, p),
        b'.' => return (TreeKind::Dot, p),
        b'/' => return (TreeKind::Slash, p),
        _ => {}
    }

    // [0-9']+(\.[0-9']+)? — the dot is only consumed when a digit follows,
    // so member access after a number still lexes as its own token.
    if c.is_ascii_digit() {
        while source[p].is_ascii_digit() || source[p] == b'\'' {
            p += 1;
        }
        if source[p] == b'.' && source[p + 1].is_ascii_digit() {
            p += 2;
            while source[p].is_ascii_digit() || source[p] == b'\'' {
                p += 1;
            }
        }
        return (TreeKind::Number, p);
    }

    match c {
        b';' => return (TreeKind::Semi, p),
        b'<' => return (TreeKind::Less, p),
        b'=' => return (TreeKind::Equal, p),
        b'>' => return (TreeKind::Greater, p),
        _ => {}
    }

    // [A-Za-z_][A-Za-z0-9'_-]*
    if c.is_ascii_alphabetic() || c == b'_' {
        while source[p].is_ascii_alphanumeric() || matches!(source[p], b'\'' | b'_' | b'-') {
            p += 1;
        }
        return (TreeKind::Name, p);
    }

    match c {
        b'[' => return (TreeKind::LeftBracket, p),
        b']' => return (TreeKind::RightBracket, p),
        b'{' => return (TreeKind::LeftBrace, p),
        b'}' => return (TreeKind::RightBrace, p),
        _ => {}
    }

    (TreeKind::Error, p)
}
