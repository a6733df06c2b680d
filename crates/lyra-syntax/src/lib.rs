//! Lyra syntax: lossless concrete syntax trees, lexer, and parser.
//!
//! This crate is the front end of the Lyra language. It turns source text
//! into a concrete syntax tree that preserves every byte of the input —
//! whitespace and comments included — while handling operator precedence,
//! nested constructor/pattern syntax, and non-fatal error recovery.
//!
//! # Modules
//!
//! - [`tree`] — the arena-backed, variable-arity node representation
//! - [`lexer`] — the stateless byte-level tokenizer
//! - [`parser`] — the shift/reduce CST builder
//! - [`diagnostic`] — parse diagnostics and source-excerpt rendering
//! - [`pretty`] — the tree printer
//!
//! # Example
//!
//! ```
//! use lyra_mem::{Arena, Interner};
//! use lyra_syntax::{Parser, TreeKind};
//!
//! let arena = Arena::new();
//! let mut intern = Interner::new();
//! let source = "double(n) = n * 2\n\0";
//!
//! let mut parser = Parser::new(&arena, &mut intern, source).unwrap();
//! let module = parser.module();
//!
//! assert_eq!(module.kind(), TreeKind::Module);
//! assert_eq!(module.width() as usize, source.len() - 1);
//! assert!(parser.diagnostics().is_empty());
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod tree;

pub use diagnostic::{Diagnostic, render_excerpt};
pub use error::SourceError;
pub use lexer::read_token;
pub use parser::Parser;
pub use pretty::print_tree;
pub use tree::{Tree, TreeKind};
