//! Immutable syntax tree with trivia attached to tokens.
//!
//! Nodes own an ordered list of children (nodes or tokens). Tokens own their
//! leading and trailing trivia. A trivia may carry a nested structure, which
//! is an ordinary [`SyntaxNode`] (documentation comments, directives).
//!
//! Every element knows two ranges:
//! - `text_range`: the element without outer trivia
//! - `full_range`: the element including the leading trivia of its first
//!   token and the trailing trivia of its last token
//!
//! All handles are cheap to clone (one `Arc` increment).

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

/// Language-independent kind discriminant.
///
/// Each language maps its closed set of kinds onto this raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawSyntaxKind(pub u16);

/// Either a node or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl SyntaxElement {
    pub fn kind(&self) -> RawSyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    pub fn full_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.full_range(),
            NodeOrToken::Token(token) => token.full_range(),
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxNode(Arc<NodeData>);

#[derive(PartialEq, Eq)]
struct NodeData {
    kind: RawSyntaxKind,
    text_range: TextRange,
    full_range: TextRange,
    children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    /// Create a node from its children.
    ///
    /// `offset` positions the node when it has no children.
    pub fn new(kind: RawSyntaxKind, offset: TextSize, children: Vec<SyntaxElement>) -> Self {
        let (text_range, full_range) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (
                TextRange::new(first.text_range().start(), last.text_range().end()),
                TextRange::new(first.full_range().start(), last.full_range().end()),
            ),
            _ => (TextRange::empty(offset), TextRange::empty(offset)),
        };
        Self(Arc::new(NodeData {
            kind,
            text_range,
            full_range,
            children,
        }))
    }

    pub fn kind(&self) -> RawSyntaxKind {
        self.0.kind
    }

    pub fn text_range(&self) -> TextRange {
        self.0.text_range
    }

    pub fn full_range(&self) -> TextRange {
        self.0.full_range
    }

    /// Children in source order.
    pub fn children_and_tokens(&self) -> &[SyntaxElement] {
        &self.0.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.0.children.iter().filter_map(|c| c.as_node())
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.0.children.iter().filter_map(|c| c.as_token())
    }

    pub fn child_node(&self, kind: RawSyntaxKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|n| n.kind() == kind)
    }

    pub fn child_token(&self, kind: RawSyntaxKind) -> Option<&SyntaxToken> {
        self.child_tokens().find(|t| t.kind() == kind)
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        let mut node = self;
        loop {
            match node.0.children.first()? {
                NodeOrToken::Token(token) => return Some(token.clone()),
                NodeOrToken::Node(child) => node = child,
            }
        }
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        let mut node = self;
        loop {
            match node.0.children.last()? {
                NodeOrToken::Token(token) => return Some(token.clone()),
                NodeOrToken::Node(child) => node = child,
            }
        }
    }

    /// All tokens below this node in source order.
    ///
    /// Does not descend into structured trivia.
    pub fn tokens(&self) -> Tokens {
        Tokens {
            stack: vec![NodeOrToken::Node(self.clone())],
        }
    }

    /// Full source text of the node, trivia included.
    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(u32::from(self.full_range().len()) as usize);
        for token in self.tokens() {
            token.write_full_text(&mut text);
        }
        text
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

/// Pre-order token iterator over a subtree.
pub struct Tokens {
    stack: Vec<SyntaxElement>,
}

impl Iterator for Tokens {
    type Item = SyntaxToken;

    fn next(&mut self) -> Option<SyntaxToken> {
        while let Some(element) = self.stack.pop() {
            match element {
                NodeOrToken::Token(token) => return Some(token),
                NodeOrToken::Node(node) => {
                    self.stack
                        .extend(node.children_and_tokens().iter().rev().cloned());
                }
            }
        }
        None
    }
}

// ============================================================================
// TOKENS
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxToken(Arc<TokenData>);

#[derive(PartialEq, Eq)]
struct TokenData {
    kind: RawSyntaxKind,
    text: SmolStr,
    text_range: TextRange,
    full_range: TextRange,
    leading: Vec<SyntaxTrivia>,
    trailing: Vec<SyntaxTrivia>,
}

impl SyntaxToken {
    pub fn new(
        kind: RawSyntaxKind,
        offset: TextSize,
        text: impl Into<SmolStr>,
        leading: Vec<SyntaxTrivia>,
        trailing: Vec<SyntaxTrivia>,
    ) -> Self {
        let text = text.into();
        let text_range = TextRange::at(offset, TextSize::of(text.as_str()));
        let full_start = leading
            .first()
            .map_or(text_range.start(), |t| t.range().start());
        let full_end = trailing.last().map_or(text_range.end(), |t| t.range().end());
        Self(Arc::new(TokenData {
            kind,
            text,
            text_range,
            full_range: TextRange::new(full_start, full_end),
            leading,
            trailing,
        }))
    }

    pub fn kind(&self) -> RawSyntaxKind {
        self.0.kind
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn text_range(&self) -> TextRange {
        self.0.text_range
    }

    pub fn full_range(&self) -> TextRange {
        self.0.full_range
    }

    pub fn leading_trivia(&self) -> &[SyntaxTrivia] {
        &self.0.leading
    }

    pub fn trailing_trivia(&self) -> &[SyntaxTrivia] {
        &self.0.trailing
    }

    fn write_full_text(&self, out: &mut String) {
        for trivia in &self.0.leading {
            out.push_str(trivia.text());
        }
        out.push_str(&self.0.text);
        for trivia in &self.0.trailing {
            out.push_str(trivia.text());
        }
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

// ============================================================================
// TRIVIA
// ============================================================================

/// What a trivia carries besides its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaPayload {
    Plain,
    Structured(SyntaxNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTrivia {
    kind: RawSyntaxKind,
    text: SmolStr,
    range: TextRange,
    payload: TriviaPayload,
}

impl SyntaxTrivia {
    pub fn new(kind: RawSyntaxKind, offset: TextSize, text: impl Into<SmolStr>) -> Self {
        let text = text.into();
        let range = TextRange::at(offset, TextSize::of(text.as_str()));
        Self {
            kind,
            text,
            range,
            payload: TriviaPayload::Plain,
        }
    }

    /// Attach a parsed structure. The structure must lie inside the trivia.
    pub fn with_structure(mut self, structure: SyntaxNode) -> Self {
        debug_assert!(self.range.contains_range(structure.full_range()));
        self.payload = TriviaPayload::Structured(structure);
        self
    }

    pub fn kind(&self) -> RawSyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn payload(&self) -> &TriviaPayload {
        &self.payload
    }

    pub fn has_structure(&self) -> bool {
        matches!(self.payload, TriviaPayload::Structured(_))
    }

    pub fn structure(&self) -> Option<&SyntaxNode> {
        match &self.payload {
            TriviaPayload::Structured(node) => Some(node),
            TriviaPayload::Plain => None,
        }
    }
}
