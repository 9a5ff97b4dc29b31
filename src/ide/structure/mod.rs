//! Block structure: collapsible regions and structure guides.
//!
//! Structure providers are looked up per node kind in a [`StructureRules`]
//! table. The aggregator walks the tree (structured trivia included), lets the
//! providers push [`BlockSpan`]s, then sorts, validates nesting and applies
//! the user's options.

mod aggregator;
mod providers;
mod regions;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::{CancellationToken, Cancelled, Span};
use crate::ide::options::StructureOptions;
use crate::syntax::{RawSyntaxKind, SyntaxNode};

pub use aggregator::{apply_options, collect_block_spans};
pub use providers::default_rules;
pub use regions::DirectiveIndex;

/// Text shown for a collapsed block without a header of its own.
pub const ELLIPSIS: &str = "...";

/// What kind of construct a block span outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Namespace,
    Type,
    Member,
    Statement,
    Conditional,
    Loop,
    Comment,
    PreprocessorRegion,
    Imports,
    Expression,
    /// Only a guide; never collapses.
    Nonstructural,
}

impl BlockType {
    pub fn is_declaration_level(self) -> bool {
        matches!(
            self,
            BlockType::Namespace | BlockType::Type | BlockType::Member | BlockType::Imports
        )
    }

    pub fn is_code_level(self) -> bool {
        matches!(
            self,
            BlockType::Statement | BlockType::Conditional | BlockType::Loop | BlockType::Expression
        )
    }

    pub fn is_comment_or_preprocessor_region(self) -> bool {
        matches!(self, BlockType::Comment | BlockType::PreprocessorRegion)
    }
}

/// A collapsible (or guide-only) region of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// The span that collapses.
    pub text_span: Span,
    /// The span previewed when hovering a collapsed block.
    pub hint_span: Span,
    pub banner_text: String,
    /// Collapses with "collapse to definitions".
    pub auto_collapse: bool,
    pub is_default_collapsed: bool,
    pub is_collapsible: bool,
    pub block_type: BlockType,
}

impl BlockSpan {
    /// A collapsible block that does not collapse automatically.
    pub fn new(block_type: BlockType, text_span: Span, hint_span: Span, banner_text: impl Into<String>) -> Self {
        Self {
            text_span,
            hint_span,
            banner_text: banner_text.into(),
            auto_collapse: false,
            is_default_collapsed: false,
            is_collapsible: block_type != BlockType::Nonstructural,
            block_type,
        }
    }

    pub fn with_auto_collapse(mut self, auto_collapse: bool) -> Self {
        self.auto_collapse = auto_collapse;
        self
    }

    pub fn with_default_collapsed(mut self, collapsed: bool) -> Self {
        self.is_default_collapsed = collapsed;
        self
    }
}

/// What providers can see besides the node.
pub struct StructureContext<'a> {
    pub text: &'a str,
    pub options: &'a StructureOptions,
    pub directives: &'a DirectiveIndex,
    pub cancel: &'a CancellationToken,
}

impl StructureContext<'_> {
    /// First line of `span`, trimmed, cut to the maximum banner length.
    pub fn banner(&self, span: Span) -> String {
        let text = self.text.get(std::ops::Range::<usize>::from(span)).unwrap_or_default();
        let line = text.lines().next().unwrap_or_default().trim();
        truncate_banner(line, self.options.maximum_banner_length)
    }
}

pub(crate) fn truncate_banner(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
        None => text.to_string(),
    }
}

/// Produces block spans for one kind of node.
pub trait StructureProvider: Send + Sync {
    fn collect(
        &self,
        node: &SyntaxNode,
        context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled>;
}

/// Node kind → structure providers.
#[derive(Default)]
pub struct StructureRules {
    by_kind: FxHashMap<RawSyntaxKind, Vec<Arc<dyn StructureProvider>>>,
    every_node: Vec<Arc<dyn StructureProvider>>,
}

impl StructureRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        kinds: impl IntoIterator<Item = impl Into<RawSyntaxKind>>,
        provider: Arc<dyn StructureProvider>,
    ) -> &mut Self {
        for kind in kinds {
            self.by_kind.entry(kind.into()).or_default().push(provider.clone());
        }
        self
    }

    /// A provider consulted for every node.
    pub fn add_for_every_node(&mut self, provider: Arc<dyn StructureProvider>) -> &mut Self {
        self.every_node.push(provider);
        self
    }

    pub fn providers(&self, kind: RawSyntaxKind) -> impl Iterator<Item = &Arc<dyn StructureProvider>> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .chain(self.every_node.iter())
    }
}

/// Receives the block spans of a document.
pub trait BlockStructureReporter {
    fn report_block_spans(&self, spans: &[BlockSpan]);
}
