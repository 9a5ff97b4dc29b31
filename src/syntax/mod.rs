//! Language-independent syntax tree.
//!
//! The engine only needs nodes with ordered children, tokens with attached
//! trivia, and trivia that may carry a nested structure. Languages plug in by
//! mapping their kinds onto [`RawSyntaxKind`] and building trees with
//! [`TreeBuilder`].

mod builder;
mod tree;

pub use builder::{Checkpoint, TreeBuilder};
pub use tree::{
    NodeOrToken, RawSyntaxKind, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia, Tokens,
    TriviaPayload,
};

// Re-export Span from base for convenience
pub use crate::base::Span;
