//! Foundation types for the syntax-lens engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Span`], [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`DocumentId`] - Identifier of an open document
//! - [`Cancelled`] - Cooperative cancellation signal
//!
//! This module has NO dependencies on other lens modules.

mod cancel;
mod document_id;
mod span;

pub use cancel::{Cancelled, check_cancelled};
pub use document_id::DocumentId;
pub use span::{LineCol, LineIndex, Span, TextRange, TextSize, intersects};

// Re-export the cancellation token so callers don't need a direct tokio-util dependency
pub use tokio_util::sync::CancellationToken;

// Re-export text-size types for convenience
pub use text_size;
