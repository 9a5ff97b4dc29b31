//! Declared names of a sample-language document.

use std::any::Any;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::SemanticModel;
use crate::parser::SyntaxKind;
use crate::syntax::SyntaxNode;

/// What a declared name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Namespace,
    Type,
    Method,
    Property,
    Field,
}

/// Map from simple name to the kind of declaration that introduced it.
///
/// When a name is declared more than once, the first declaration in source
/// order wins.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    names: FxHashMap<SmolStr, DeclarationKind>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect declarations from a parsed compilation unit.
    pub fn build(root: &SyntaxNode) -> Self {
        let mut index = Self::new();
        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            index.record(&node);
            // Reverse so that earlier declarations are recorded first
            let children: Vec<_> = node.child_nodes().cloned().collect();
            stack.extend(children.into_iter().rev());
        }
        index
    }

    fn record(&mut self, node: &SyntaxNode) {
        let Some(kind) = SyntaxKind::from_raw(node.kind()) else {
            return;
        };
        let declaration = match kind {
            SyntaxKind::NAMESPACE_DECLARATION => {
                if let Some(name) = node.child_node(SyntaxKind::QUALIFIED_NAME.into()) {
                    for token in name.child_tokens().filter(|t| t.kind() == SyntaxKind::IDENT) {
                        self.insert(token.text(), DeclarationKind::Namespace);
                    }
                }
                return;
            }
            k if k.is_type_declaration() => DeclarationKind::Type,
            SyntaxKind::METHOD_DECLARATION => DeclarationKind::Method,
            SyntaxKind::PROPERTY_DECLARATION => DeclarationKind::Property,
            SyntaxKind::FIELD_DECLARATION => DeclarationKind::Field,
            _ => return,
        };
        if let Some(name) = node.child_token(SyntaxKind::IDENT.into()) {
            self.insert(name.text(), declaration);
        }
    }

    pub fn insert(&mut self, name: &str, kind: DeclarationKind) {
        self.names.entry(SmolStr::new(name)).or_insert(kind);
    }

    pub fn lookup(&self, name: &str) -> Option<DeclarationKind> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SemanticModel for DeclarationIndex {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
