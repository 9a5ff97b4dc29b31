//! Bottom-up tree construction.

use crate::base::TextSize;

use super::tree::{NodeOrToken, RawSyntaxKind, SyntaxElement, SyntaxNode, SyntaxToken};

/// Builds a [`SyntaxNode`] from a flat sequence of start/token/finish events.
///
/// Tokens arrive fully formed (trivia attached, absolute offsets); the
/// builder only takes care of nesting.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    parents: Vec<(RawSyntaxKind, usize, TextSize)>,
    children: Vec<SyntaxElement>,
    offset: TextSize,
}

/// Position in the event stream, used to wrap already-emitted elements.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize, TextSize);

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: RawSyntaxKind) {
        self.parents.push((kind, self.children.len(), self.offset));
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len(), self.offset)
    }

    /// Start a node that adopts every element emitted since `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: RawSyntaxKind) {
        let Checkpoint(first_child, offset) = checkpoint;
        debug_assert!(first_child <= self.children.len());
        self.parents.push((kind, first_child, offset));
    }

    pub fn token(&mut self, token: SyntaxToken) {
        self.offset = token.full_range().end();
        self.children.push(NodeOrToken::Token(token));
    }

    pub fn node(&mut self, node: SyntaxNode) {
        self.offset = node.full_range().end();
        self.children.push(NodeOrToken::Node(node));
    }

    pub fn finish_node(&mut self) {
        let Some((kind, first_child, offset)) = self.parents.pop() else {
            debug_assert!(false, "finish_node without start_node");
            return;
        };
        let children = self.children.split_off(first_child);
        let node = SyntaxNode::new(kind, offset, children);
        self.children.push(NodeOrToken::Node(node));
    }

    /// Finish the tree. Exactly one root node must remain.
    pub fn finish(mut self) -> SyntaxNode {
        debug_assert!(self.parents.is_empty(), "unfinished nodes");
        debug_assert_eq!(self.children.len(), 1, "builder must produce a single root");
        match self.children.pop() {
            Some(NodeOrToken::Node(root)) => root,
            Some(NodeOrToken::Token(token)) => {
                SyntaxNode::new(token.kind(), token.text_range().start(), vec![NodeOrToken::Token(token)])
            }
            None => SyntaxNode::new(RawSyntaxKind(0), self.offset, Vec::new()),
        }
    }
}
