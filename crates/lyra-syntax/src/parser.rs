//! Shift/reduce parser building lossless concrete syntax trees.
//!
//! The parser holds one lookahead token, a working stack of finished
//! subtrees, and a side buffer of pending trivia. Grammar rules are
//! recursive functions over four primitives:
//!
//! - `shift`: commit pending trivia and the lookahead token to the stack as
//!   leaves, then refill the lookahead (siphoning new trivia aside).
//! - `mark`: save the current stack height (trivia included) as the start
//!   boundary of a future reduction.
//! - `reduce`: collapse everything above a saved mark into one new node
//!   whose width is the sum of the collapsed widths.
//! - `eat`/`expect`: conditional shift; `expect` records a diagnostic on
//!   mismatch without consuming the token.
//!
//! Grammar violations never abort the parse. `expect` leaves the offending
//! token as lookahead and the enclosing [`Parser::module`] loop forces
//! progress by shifting exactly one token into an error node, so the worst
//! case is one diagnostic per skipped token and the parse always reaches a
//! [`TreeKind::Module`] root.

use lyra_log::debug;
use lyra_mem::{Arena, Interner};

use crate::diagnostic::Diagnostic;
use crate::error::SourceError;
use crate::lexer::read_token;
use crate::tree::{Tree, TreeKind};

/// Parser state for one source buffer.
///
/// `'a` is the arena (and interner entry) lifetime; `'p` covers the borrows
/// of the source text and the intern table.
pub struct Parser<'a, 'p> {
    arena: &'a Arena,
    intern: &'p mut Interner<'a>,
    source: &'p str,

    // Finished subtrees not yet folded into a parent, and the topmost run
    // of trivia that follows them but precedes the lookahead token.
    stack: Vec<&'a Tree>,
    space: Vec<&'a Tree>,

    // The lookahead token, the offset where its lexeme begins, and the
    // cursor after it. `end` is the NUL sentinel position.
    token: TreeKind,
    text: usize,
    begin: usize,
    end: usize,

    diagnostics: Vec<Diagnostic>,
}

impl<'a, 'p> Parser<'a, 'p> {
    /// Creates a parser over `source`, whose last byte must be NUL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingSentinel`] when the buffer is empty or
    /// does not end with the sentinel.
    pub fn new(
        arena: &'a Arena,
        intern: &'p mut Interner<'a>,
        source: &'p str,
    ) -> Result<Self, SourceError> {
        let bytes = source.as_bytes();
        let end = match bytes.len().checked_sub(1) {
            Some(end) if bytes[end] == 0 => end,
            _ => return Err(SourceError::MissingSentinel),
        };

        let mut parser = Parser {
            arena,
            intern,
            source,
            stack: Vec::new(),
            space: Vec::new(),
            token: TreeKind::End,
            text: 0,
            begin: 0,
            end,
            diagnostics: Vec::new(),
        };
        parser.read();
        Ok(parser)
    }

    /// The diagnostics collected so far, in source order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the parser, yielding its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parses the whole buffer into one module.
    ///
    /// Repeats definitions until the end sentinel; a token that cannot start
    /// a definition is reported, shifted, and wrapped in an error node so
    /// the loop always advances. Trailing trivia is committed before the
    /// final reduction so the tree stays lossless.
    pub fn module(&mut self) -> &'a Tree {
        while self.token != TreeKind::End {
            let start = self.mark();
            if self.eat(TreeKind::Name) {
                if self.token != TreeKind::Equal {
                    self.pattern();
                    self.reduce(TreeKind::CutExpr, start);
                }
                self.expect(TreeKind::Equal);
                self.expression(TreeKind::Definition);
                self.reduce(TreeKind::Definition, start);
            } else {
                self.report("definition");
                debug!("skipping {} to recover", self.token.name());
                self.shift();
                self.reduce(TreeKind::Error, start);
            }
        }

        self.stack.append(&mut self.space);
        self.reduce(TreeKind::Module, 0)
    }

    /// Parses one expression; `parent` is the operator context the result
    /// will become a right child of. Returns `false` without consuming
    /// anything when the lookahead cannot start an expression.
    fn expression(&mut self, parent: TreeKind) -> bool {
        let start = self.mark();
        if self.token == TreeKind::Name {
            self.intern_name();
            self.constructor();
        } else if self.eat(TreeKind::Number) {
        } else if self.eat(TreeKind::String) {
        } else if self.token == TreeKind::LeftBrace {
            self.object();
        } else if self.eat(TreeKind::LeftParen) {
            self.expression(TreeKind::ParenExpr);
            self.expect(TreeKind::RightParen);
            self.reduce(TreeKind::ParenExpr, start);
        } else {
            self.report("expression");
            return false;
        }

        // Juxtaposed terms apply left to right.
        loop {
            if self.token == TreeKind::Name {
                self.intern_name();
                self.constructor();
            } else if self.token == TreeKind::LeftParen {
                self.constructor();
            } else if self.token == TreeKind::LeftBrace {
                self.object();
            } else {
                break;
            }
            self.reduce(TreeKind::CutExpr, start);
        }

        // Precedence climb: each accepted operator becomes the parent
        // context of its own right operand.
        while right_child(parent, self.token) {
            let operator = self.token;
            self.shift();
            self.expression(operator);
            self.reduce(TreeKind::BinaryExpr, start);
        }

        true
    }

    /// An optional name followed by an optional parenthesized argument
    /// list; used in expression position.
    fn constructor(&mut self) {
        let start = self.mark();
        self.eat(TreeKind::Name);
        if self.eat(TreeKind::LeftParen) {
            while self.token != TreeKind::End && self.token != TreeKind::RightParen {
                if !self.expression(TreeKind::ConsExpr) {
                    break;
                }
                if self.token != TreeKind::RightParen {
                    self.expect(TreeKind::Comma);
                }
            }
            self.expect(TreeKind::RightParen);
            self.reduce(TreeKind::ConsExpr, start);
        }
    }

    /// A brace-delimited case literal: comma-separated `pattern ->
    /// expression` method clauses.
    fn object(&mut self) {
        let start = self.mark();
        self.expect(TreeKind::LeftBrace);
        while self.token != TreeKind::End && self.token != TreeKind::RightBrace {
            let clause = self.mark();
            if !self.pattern() {
                break;
            }
            self.arrow();
            self.expression(TreeKind::Method);
            self.reduce(TreeKind::Method, clause);
            if self.token != TreeKind::RightBrace {
                self.expect(TreeKind::Comma);
            }
        }
        self.expect(TreeKind::RightBrace);
        self.reduce(TreeKind::CaseExpr, start);
    }

    /// Mirrors `expression` for pattern position: primaries and
    /// juxtaposition, but no binary operators and no case literals.
    fn pattern(&mut self) -> bool {
        let start = self.mark();
        if self.token == TreeKind::Name {
            self.intern_name();
            self.destructor();
        } else if self.token == TreeKind::LeftParen {
            self.destructor();
        } else if self.eat(TreeKind::Number) {
        } else if self.eat(TreeKind::String) {
        } else {
            self.report("pattern");
            return false;
        }

        loop {
            if self.token == TreeKind::Name {
                self.intern_name();
                self.destructor();
            } else if self.token == TreeKind::LeftParen {
                self.destructor();
            } else {
                break;
            }
            self.reduce(TreeKind::CutExpr, start);
        }

        true
    }

    /// The pattern-position twin of `constructor`.
    fn destructor(&mut self) {
        let start = self.mark();
        self.eat(TreeKind::Name);
        if self.eat(TreeKind::LeftParen) {
            while self.token != TreeKind::End && self.token != TreeKind::RightParen {
                if !self.pattern() {
                    break;
                }
                if self.token != TreeKind::RightParen {
                    self.expect(TreeKind::Comma);
                }
            }
            self.expect(TreeKind::RightParen);
            self.reduce(TreeKind::ConsExpr, start);
        }
    }

    /// Expects an arrow. The lexer produces `-` and `>` separately, so when
    /// the lookahead is `-`, re-lex one token from the cursor and splice the
    /// pair into a single two-byte arrow token.
    fn arrow(&mut self) {
        if self.token == TreeKind::Minus {
            let (token, next) = read_token(self.source.as_bytes(), self.begin, self.end);
            if token == TreeKind::Greater {
                self.begin = next;
                self.token = TreeKind::Arrow;
            }
        }

        self.expect(TreeKind::Arrow);
    }

    /// Shifts the lookahead when it matches; reports otherwise. The
    /// mismatched token stays as lookahead for the caller's recovery point.
    fn expect(&mut self, expected: TreeKind) {
        if !self.eat(expected) {
            self.report(expected.name());
        }
    }

    /// Records a diagnostic against the lookahead lexeme.
    fn report(&mut self, expected: &str) {
        let message = format!("expected {expected}; found {}", self.token.name());
        debug!("{message} at offset {}", self.text);
        self.diagnostics.push(Diagnostic {
            message,
            offset: self.text,
            width: (self.begin - self.text).max(1),
        });
    }

    /// Shifts the lookahead when it matches, returning whether it did.
    fn eat(&mut self, expected: TreeKind) -> bool {
        if self.token == expected {
            self.shift();
            true
        } else {
            false
        }
    }

    /// Commits pending trivia and the lookahead token to the stack as
    /// leaves, then refills the lookahead.
    fn shift(&mut self) {
        self.stack.append(&mut self.space);

        let width = (self.begin - self.text) as u32;
        if self.token == TreeKind::String && !self.string_is_terminated() {
            self.diagnostics.push(Diagnostic {
                message: "unterminated string".into(),
                offset: self.text,
                width: width.max(1) as usize,
            });
        }
        self.stack.push(Tree::leaf(self.arena, self.token, width));

        self.read();
    }

    /// Refills the lookahead, siphoning trivia into `space` until a
    /// structural token comes up.
    fn read(&mut self) {
        loop {
            self.text = self.begin;
            let (token, next) = read_token(self.source.as_bytes(), self.begin, self.end);
            self.token = token;
            self.begin = next;

            if !token.is_trivia() {
                break;
            }

            let width = (self.begin - self.text) as u32;
            self.space.push(Tree::leaf(self.arena, token, width));
        }
    }

    /// Saves the height everything parsed so far reaches, pending trivia
    /// included, as the start boundary of a future reduction.
    fn mark(&self) -> usize {
        self.stack.len() + self.space.len()
    }

    /// Collapses `stack[start..]` into one node of the given kind, with the
    /// collapsed trees as children and their summed widths as the width.
    fn reduce(&mut self, kind: TreeKind, start: usize) -> &'a Tree {
        let children = &self.stack[start..];
        let width = children.iter().map(|child| child.width()).sum();
        let tree = Tree::node(self.arena, kind, width, children);

        self.stack.truncate(start);
        self.stack.push(tree);
        tree
    }

    /// Interns the lookahead name's spelling. The symbol is recorded in the
    /// table for later passes; tree nodes do not reference it yet.
    fn intern_name(&mut self) {
        let text = &self.source[self.text..self.begin];
        self.intern.intern(self.arena, text);
    }

    /// A shifted string token is terminated when it closes with a quote of
    /// its own; a quote that was consumed as `\"` never closes.
    fn string_is_terminated(&self) -> bool {
        let lexeme = &self.source.as_bytes()[self.text..self.begin];
        lexeme.len() >= 2 && lexeme[lexeme.len() - 1] == b'"' && lexeme[lexeme.len() - 2] != b'\\'
    }
}

/// Decides whether `child` may bind as a right-deeper operator under
/// `parent`: `+ -` never nest under arithmetic parents (left associativity),
/// `* /` nest under `+ -` (tighter binding) but not under themselves.
fn right_child(parent: TreeKind, child: TreeKind) -> bool {
    match child {
        TreeKind::Plus | TreeKind::Minus => !matches!(
            parent,
            TreeKind::Plus | TreeKind::Minus | TreeKind::Star | TreeKind::Slash
        ),
        TreeKind::Star | TreeKind::Slash => {
            !matches!(parent, TreeKind::Star | TreeKind::Slash)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_parse<R>(source: &str, check: impl FnOnce(&Tree, &[Diagnostic]) -> R) -> R {
        let arena = Arena::new();
        let mut intern = Interner::new();
        let mut parser = Parser::new(&arena, &mut intern, source).unwrap();
        let root = parser.module();
        let diagnostics = parser.into_diagnostics();
        check(root, &diagnostics)
    }

    fn assert_widths(tree: &Tree) {
        if tree.arity() > 0 {
            let sum: u32 = tree.children().iter().map(|c| c.width()).sum();
            assert_eq!(tree.width(), sum, "width mismatch on {:?}", tree.kind());
            for child in tree.children() {
                assert_widths(child);
            }
        }
    }

    #[test]
    fn missing_sentinel_is_rejected() {
        let arena = Arena::new();
        let mut intern = Interner::new();
        assert_eq!(
            Parser::new(&arena, &mut intern, "f = 1").err(),
            Some(SourceError::MissingSentinel)
        );
        assert_eq!(
            Parser::new(&arena, &mut intern, "").err(),
            Some(SourceError::MissingSentinel)
        );
    }

    #[test]
    fn empty_buffer_is_an_empty_module() {
        with_parse("\0", |root, diagnostics| {
            assert_eq!(root.kind(), TreeKind::Module);
            assert_eq!(root.arity(), 0);
            assert_eq!(root.width(), 0);
            assert!(diagnostics.is_empty());
        });
    }

    #[test]
    fn simple_definition() {
        with_parse("x = 1\0", |root, diagnostics| {
            assert!(diagnostics.is_empty());
            assert_eq!(root.kind(), TreeKind::Module);
            assert_eq!(root.arity(), 1);

            let definition = root.children()[0];
            assert_eq!(definition.kind(), TreeKind::Definition);
            assert_widths(root);
        });
    }

    #[test]
    fn right_child_table() {
        use TreeKind::*;

        assert!(right_child(Definition, Plus));
        assert!(right_child(Definition, Star));
        assert!(!right_child(Plus, Plus));
        assert!(!right_child(Minus, Plus));
        assert!(!right_child(Star, Minus));
        assert!(right_child(Plus, Star));
        assert!(right_child(Minus, Slash));
        assert!(!right_child(Star, Star));
        assert!(!right_child(Slash, Star));
        assert!(!right_child(Definition, Less));
        assert!(!right_child(Definition, Name));
    }

    #[test]
    fn unterminated_string_is_reported() {
        with_parse("x = \"open\0", |_root, diagnostics| {
            assert!(diagnostics.iter().any(|d| d.message == "unterminated string"));
        });
    }

    #[test]
    fn terminated_string_is_clean() {
        with_parse("x = \"ok\\\"quoted\"\0", |_root, diagnostics| {
            assert!(diagnostics.is_empty());
        });
    }

    #[test]
    fn expect_reports_and_keeps_token() {
        // Missing right parenthesis: parse still reaches a module root.
        with_parse("f(x = 1\0", |root, diagnostics| {
            assert_eq!(root.kind(), TreeKind::Module);
            assert!(!diagnostics.is_empty());
            assert_widths(root);
        });
    }
}
