//! Round-trip integration tests.
//!
//! The tree is lossless: walking the leaves of the root in order and taking
//! each leaf's width of source bytes reconstructs the original input
//! exactly, whitespace and comments included.

use lyra_mem::{Arena, Interner};
use lyra_syntax::{Parser, Tree};

/// Walks leaves in order, mapping each to its span of `source` by
/// accumulated width, and concatenates the spans.
fn reconstruct(root: &Tree, source: &str) -> String {
    fn walk<'s>(tree: &Tree, source: &'s str, offset: &mut usize, out: &mut String) {
        if tree.arity() == 0 {
            let next = *offset + tree.width() as usize;
            out.push_str(&source[*offset..next]);
            *offset = next;
        } else {
            for child in tree.children() {
                walk(child, source, offset, out);
            }
        }
    }

    let mut out = String::new();
    let mut offset = 0;
    walk(root, source, &mut offset, &mut out);
    out
}

/// Parses and checks that the tree reproduces `source` minus the sentinel.
fn assert_roundtrip(source: &str) {
    let arena = Arena::new();
    let mut intern = Interner::new();
    let mut parser = Parser::new(&arena, &mut intern, source).unwrap();
    let root = parser.module();

    let text = &source[..source.len() - 1];
    assert_eq!(root.width() as usize, text.len(), "root width for {text:?}");
    assert_eq!(reconstruct(root, source), text, "leaf spans for {text:?}");
}

#[test]
fn roundtrip_empty() {
    assert_roundtrip("\0");
}

#[test]
fn roundtrip_trivia_only() {
    assert_roundtrip("  \t\n\0");
    assert_roundtrip("# just a comment\n\0");
    assert_roundtrip("\n\n# one\n# two\n\0");
}

#[test]
fn roundtrip_simple_definition() {
    assert_roundtrip("x = 1\0");
    assert_roundtrip("x = 1\n\0");
}

#[test]
fn roundtrip_demo_program() {
    assert_roundtrip(
        "fibonacci(n) = n {\n    0 -> 0,\n    1 -> 1,\n    _ -> fibonacci(n - 1) + fibonacci(n - 2),\n}\n\0",
    );
}

#[test]
fn roundtrip_comments_between_definitions() {
    assert_roundtrip("# head\nf(x) = x # tail\ng(y) = y\n# trailing\n\0");
}

#[test]
fn roundtrip_operators_and_strings() {
    assert_roundtrip("calc = 1 + 2 * 3 - 4 / 5\n\0");
    assert_roundtrip("greet = \"hello \\\"world\\\"\"\n\0");
    assert_roundtrip("nums = sum(1'000, 2.5)\n\0");
}

#[test]
fn roundtrip_survives_errors() {
    assert_roundtrip("= = =\0");
    assert_roundtrip("@ ? x = 1\0");
    assert_roundtrip("f( = 1\n\0");
    assert_roundtrip("x = \"unterminated\0");
}

#[test]
fn roundtrip_embedded_nul() {
    assert_roundtrip("a = 1\0b = 2\0");
}

#[test]
fn roundtrip_trailing_whitespace() {
    assert_roundtrip("x = 1   \n\t \0");
}
