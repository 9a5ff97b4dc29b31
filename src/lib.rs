//! # syntax-lens
//!
//! Incremental syntax classification, block structure (outlining) and
//! todo-comment engine for editor tooling.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Classification, block structure, todo comments, AnalysisHost
//!   ↓
//! semantic  → Opaque semantic models (declaration index for the sample language)
//!   ↓
//! syntax    → Language-independent tree: nodes, tokens, structured trivia
//!   ↓
//! parser    → Logos lexer and recursive-descent parser for the sample language
//!   ↓
//! base      → Primitives (DocumentId, spans, LineIndex, cancellation)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → semantic → ide)
// ============================================================================

/// Foundation types: DocumentId, spans, line index, cancellation
pub mod base;

/// Syntax: tree types, structured trivia, TreeBuilder
pub mod syntax;

/// Parser: Logos lexer, trivia attachment, recursive-descent parser
pub mod parser;

/// Semantic models passed through to classifiers
pub mod semantic;

/// IDE features: classification, block structure, todo comments
pub mod ide;

// Re-export foundation types
pub use base::{CancellationToken, Cancelled, DocumentId, LineCol, LineIndex, Span, TextRange, TextSize};
