//! Semantic oracle handed to classifiers.
//!
//! The engine never looks inside a semantic model; it passes it through to
//! classifiers, which downcast it to whatever model their language provides.

mod declarations;

use std::any::Any;

pub use declarations::{DeclarationIndex, DeclarationKind};

/// Opaque semantic information about a document.
pub trait SemanticModel: Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// A semantic model that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSemantics;

impl SemanticModel for NoSemantics {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
