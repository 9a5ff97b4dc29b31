//! Classification: tagging sub-spans of a tree with semantic categories.
//!
//! ```text
//! ClassifierRegistry  (which classifiers apply to a kind, memoized)
//!        ↓
//! Worker              (explicit-stack walk over nodes, tokens, structured trivia)
//!        ↓
//! DedupSink           (one entry per (span, tag), first-seen order)
//! ```
//!
//! Classifiers are plugins: the walker only knows their filters and calls
//! them with the element, the semantic model and the cancellation token.

mod classifiers;
mod registry;
mod service;
mod sink;
mod worker;

use smol_str::SmolStr;

use crate::base::{CancellationToken, Cancelled, Span};
use crate::semantic::SemanticModel;
use crate::syntax::{RawSyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia};

pub use classifiers::{
    DeclarationNameClassifier, DirectiveClassifier, SyntacticTokenClassifier, TriviaClassifier,
    default_registry,
};
pub use registry::{ClassifierList, ClassifierRegistry, RegistryBuilder};
pub use service::{ClassificationReporter, ClassificationService};
pub use sink::DedupSink;
pub use worker::classify;

/// Standard classification tags.
pub mod tags {
    pub const KEYWORD: &str = "keyword";
    pub const IDENTIFIER: &str = "identifier";
    pub const CLASS_NAME: &str = "class name";
    pub const NAMESPACE_NAME: &str = "namespace name";
    pub const METHOD_NAME: &str = "method name";
    pub const PROPERTY_NAME: &str = "property name";
    pub const FIELD_NAME: &str = "field name";
    pub const COMMENT: &str = "comment";
    pub const STRING: &str = "string";
    pub const NUMBER: &str = "number";
    pub const OPERATOR: &str = "operator";
    pub const PUNCTUATION: &str = "punctuation";
    pub const PREPROCESSOR_KEYWORD: &str = "preprocessor keyword";
    pub const PREPROCESSOR_TEXT: &str = "preprocessor text";
    pub const XML_DOC_DELIMITER: &str = "xml doc comment - delimiter";
    pub const XML_DOC_NAME: &str = "xml doc comment - name";
    pub const XML_DOC_TEXT: &str = "xml doc comment - text";
}

/// A span of source text tagged with a classification.
///
/// Two classified spans are the same classification iff span and tag are
/// equal. An empty tag means "no classification".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassifiedSpan {
    pub span: Span,
    pub tag: SmolStr,
}

impl ClassifiedSpan {
    pub fn new(span: Span, tag: impl Into<SmolStr>) -> Self {
        Self {
            span,
            tag: tag.into(),
        }
    }
}

/// Which kinds a classifier wants to see.
#[derive(Debug, Clone)]
pub enum KindFilter {
    Nothing,
    All,
    Only(Vec<RawSyntaxKind>),
    /// A kind or any of its sub-kinds, as decided by the predicate.
    Matching(fn(RawSyntaxKind) -> bool),
}

impl KindFilter {
    /// An empty kind list means every kind.
    pub fn from_kinds(kinds: impl IntoIterator<Item = impl Into<RawSyntaxKind>>) -> Self {
        let kinds: Vec<RawSyntaxKind> = kinds.into_iter().map(Into::into).collect();
        if kinds.is_empty() {
            KindFilter::All
        } else {
            KindFilter::Only(kinds)
        }
    }

    pub fn accepts(&self, kind: RawSyntaxKind) -> bool {
        match self {
            KindFilter::Nothing => false,
            KindFilter::All => true,
            KindFilter::Only(kinds) => kinds.contains(&kind),
            KindFilter::Matching(predicate) => predicate(kind),
        }
    }
}

/// A pluggable classifier.
///
/// The token filter also selects plain trivia by kind. All hooks append to
/// `out`; the walker drops empty tags, spans outside the requested range and
/// duplicates.
pub trait SyntaxClassifier: Send + Sync {
    fn name(&self) -> &str;

    fn node_filter(&self) -> KindFilter {
        KindFilter::Nothing
    }

    fn token_filter(&self) -> KindFilter {
        KindFilter::Nothing
    }

    fn classify_node(
        &self,
        _node: &SyntaxNode,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        _out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        Ok(())
    }

    fn classify_token(
        &self,
        _token: &SyntaxToken,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        _out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        Ok(())
    }

    fn classify_trivia(
        &self,
        _trivia: &SyntaxTrivia,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        _out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        Ok(())
    }
}
