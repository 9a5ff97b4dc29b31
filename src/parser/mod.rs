//! Parser for the sample brace language
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - a recursive descent parser over tokens with attached trivia
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → flat tokens, trivia included
//!     ↓
//! Trivia attachment → tokens owning leading/trailing trivia
//!     ↓                (directives and doc comments get a structure)
//! Parser → SyntaxNode tree (immutable, cheap to clone)
//! ```
//!
//! Every byte of the input ends up in exactly one token or trivia, so the
//! tree's full text is always the source text.

#[allow(clippy::module_inception)]
mod parser;

mod directive;
mod doc_comment;
mod lexer;
mod syntax_kind;
mod trivia;

pub use directive::directive_message;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, ParseError, parse};
pub use syntax_kind::SyntaxKind;
