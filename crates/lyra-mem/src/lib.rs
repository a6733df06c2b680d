//! Memory infrastructure for the Lyra compiler frontend.
//!
//! This crate provides the two allocation primitives the frontend is built
//! on:
//!
//! - [`Arena`]: a bump allocator with slab growth and stable addresses.
//!   Syntax trees and symbol records live here and are freed all at once
//!   when the parse session ends.
//! - [`Interner`] / [`Symbol`]: deduplicated spellings with dense,
//!   first-seen ordinals and identity comparison.

#![warn(missing_docs)]

pub mod arena;
pub mod interner;
pub mod symbol;

pub use arena::{Arena, ArenaStats};
pub use interner::Interner;
pub use symbol::Symbol;
