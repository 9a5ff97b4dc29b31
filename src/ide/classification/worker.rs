//! The classification walk.
//!
//! Explicit-stack depth-first traversal. Children are pushed in reverse so
//! that pops follow source order. A token expands into its leading trivia,
//! its own body, then its trailing trivia. Structured trivia are walked like
//! any other node; plain trivia go to the classifiers registered for their
//! kind.

use tracing::{debug, trace};

use super::registry::ClassifierRegistry;
use super::sink::DedupSink;
use super::ClassifiedSpan;
use crate::base::{CancellationToken, Cancelled, Span, TextRange, check_cancelled, intersects};
use crate::ide::pool::Pool;
use crate::semantic::SemanticModel;
use crate::syntax::{NodeOrToken, SyntaxNode, SyntaxToken, SyntaxTrivia};

/// One unit of pending work on the walker's stack.
#[derive(Debug)]
enum WorkItem {
    Node(SyntaxNode),
    Token(SyntaxToken),
    /// The token itself, after its leading trivia have been walked.
    TokenBody(SyntaxToken),
    Trivia(SyntaxTrivia),
    StructuredTrivia(SyntaxNode),
}

impl WorkItem {
    fn full_range(&self) -> TextRange {
        match self {
            WorkItem::Node(node) | WorkItem::StructuredTrivia(node) => node.full_range(),
            WorkItem::Token(token) | WorkItem::TokenBody(token) => token.full_range(),
            WorkItem::Trivia(trivia) => trivia.range(),
        }
    }
}

/// Buffers reused across walks.
#[derive(Debug, Default)]
pub struct WalkerPools {
    stacks: Pool<Vec<WorkItem>>,
    scratch: Pool<Vec<ClassifiedSpan>>,
    sinks: Pool<DedupSink>,
}

impl WalkerPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers currently checked in, across all pools.
    pub fn idle_buffers(&self) -> usize {
        self.stacks.available() + self.scratch.available() + self.sinks.available()
    }
}

/// Classify every element of `root` whose span intersects `span`.
///
/// Results come back in source order, deduplicated by (span, tag). On
/// cancellation nothing is returned.
///
/// Buffers live for this call only. Repeated classification should go
/// through [`ClassificationService`](super::ClassificationService), which
/// keeps them pooled across calls.
pub fn classify(
    root: &SyntaxNode,
    span: Span,
    registry: &ClassifierRegistry,
    model: &dyn SemanticModel,
    cancel: &CancellationToken,
) -> Result<Vec<ClassifiedSpan>, Cancelled> {
    let pools = WalkerPools::new();
    Worker::new(registry, model, &pools, cancel).run(root, span)
}

pub(crate) struct Worker<'a> {
    registry: &'a ClassifierRegistry,
    model: &'a dyn SemanticModel,
    pools: &'a WalkerPools,
    cancel: &'a CancellationToken,
}

impl<'a> Worker<'a> {
    pub(crate) fn new(
        registry: &'a ClassifierRegistry,
        model: &'a dyn SemanticModel,
        pools: &'a WalkerPools,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            registry,
            model,
            pools,
            cancel,
        }
    }

    pub(crate) fn run(&self, root: &SyntaxNode, span: Span) -> Result<Vec<ClassifiedSpan>, Cancelled> {
        let mut stack = self.pools.stacks.checkout();
        let mut scratch = self.pools.scratch.checkout();
        let mut sink = self.pools.sinks.checkout();

        stack.push(WorkItem::Node(root.clone()));
        while let Some(item) = stack.pop() {
            check_cancelled(self.cancel)?;
            if !intersects(item.full_range(), span) {
                continue;
            }

            match item {
                WorkItem::Node(node) | WorkItem::StructuredTrivia(node) => {
                    for classifier in self.registry.node_classifiers(node.kind()).iter() {
                        classifier.classify_node(&node, self.model, self.cancel, &mut scratch)?;
                    }
                    flush(&mut scratch, &mut sink, span);

                    for child in node.children_and_tokens().iter().rev() {
                        stack.push(match child {
                            NodeOrToken::Node(child) => WorkItem::Node(child.clone()),
                            NodeOrToken::Token(token) => WorkItem::Token(token.clone()),
                        });
                    }
                }
                WorkItem::Token(token) => {
                    push_trivia(&mut stack, token.trailing_trivia());
                    stack.push(WorkItem::TokenBody(token.clone()));
                    push_trivia(&mut stack, token.leading_trivia());
                }
                WorkItem::TokenBody(token) => {
                    for classifier in self.registry.token_classifiers(token.kind()).iter() {
                        classifier.classify_token(&token, self.model, self.cancel, &mut scratch)?;
                    }
                    flush(&mut scratch, &mut sink, span);
                }
                WorkItem::Trivia(trivia) => {
                    for classifier in self.registry.token_classifiers(trivia.kind()).iter() {
                        classifier.classify_trivia(&trivia, self.model, self.cancel, &mut scratch)?;
                    }
                    flush(&mut scratch, &mut sink, span);
                }
            }
        }

        debug!(?span, count = sink.len(), "classified");
        Ok(sink.to_vec())
    }
}

fn push_trivia(stack: &mut Vec<WorkItem>, trivia: &[SyntaxTrivia]) {
    for trivia in trivia.iter().rev() {
        stack.push(match trivia.structure() {
            Some(structure) => WorkItem::StructuredTrivia(structure.clone()),
            None => WorkItem::Trivia(trivia.clone()),
        });
    }
}

/// Move classifier output into the sink, dropping empty tags and spans
/// outside the query.
fn flush(scratch: &mut Vec<ClassifiedSpan>, sink: &mut DedupSink, query: Span) {
    for classified in scratch.drain(..) {
        if classified.tag.is_empty() {
            continue;
        }
        if !intersects(classified.span, query) {
            trace!(span = ?classified.span, tag = %classified.tag, "dropped span outside query");
            continue;
        }
        sink.insert(classified);
    }
}
