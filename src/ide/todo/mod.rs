//! Todo comments: `TODO`, `HACK` and friends found in comment trivia.
//!
//! Descriptors come from option strings of the form `TEXT:priority`. The
//! [`scan`] pass returns raw [`TodoComment`]s with byte positions; hosts
//! convert them to line/column form with [`TodoComment::to_data`].

mod scanner;

use smol_str::SmolStr;
use tracing::trace;

use crate::base::{DocumentId, LineIndex, TextSize};

pub use scanner::scan;

/// A word that marks a todo comment, and the priority it reports with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoCommentDescriptor {
    pub text: SmolStr,
    pub priority: i32,
}

impl TodoCommentDescriptor {
    pub fn new(text: impl Into<SmolStr>, priority: i32) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }

    /// Parse option strings like `"TODO:1"`.
    ///
    /// A missing priority defaults to 1. Entries with an empty text, more
    /// than one `:` or a priority that is not an integer are skipped.
    pub fn parse_options(tokens: &[String]) -> Vec<Self> {
        tokens
            .iter()
            .filter_map(|token| {
                let descriptor = Self::parse_one(token);
                if descriptor.is_none() {
                    trace!(token = %token, "skipped malformed todo descriptor");
                }
                descriptor
            })
            .collect()
    }

    fn parse_one(token: &str) -> Option<Self> {
        let (text, priority) = match token.split_once(':') {
            Some((text, priority)) => (text.trim(), priority.trim()),
            None => (token.trim(), ""),
        };
        if text.is_empty() {
            return None;
        }
        let priority = match priority {
            "" => 1,
            priority => priority.parse().ok()?,
        };
        Some(Self::new(text, priority))
    }
}

/// A todo comment found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoComment {
    pub descriptor: TodoCommentDescriptor,
    /// The comment from the descriptor word to the end of its line, trimmed.
    pub message: String,
    /// Offset of the descriptor word.
    pub position: TextSize,
}

/// A todo comment in the line/column form hosts report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCommentData {
    pub priority: i32,
    pub message: String,
    pub document_id: DocumentId,
    pub line: u32,
    pub column: u32,
}

impl TodoComment {
    /// Convert to line/column form. Positions past the end of `text` are
    /// clamped to its end.
    pub fn to_data(&self, document_id: DocumentId, text: &str, line_index: &LineIndex) -> TodoCommentData {
        let position = self.position.min(TextSize::of(text));
        let pos = line_index.line_col(position);
        TodoCommentData {
            priority: self.descriptor.priority,
            message: self.message.clone(),
            document_id,
            line: pos.line,
            column: pos.col,
        }
    }
}
