//! Built-in classifiers for the sample language.

use std::sync::Arc;

use super::registry::ClassifierRegistry;
use super::{ClassifiedSpan, KindFilter, SyntaxClassifier, tags};
use crate::base::{CancellationToken, Cancelled, TextRange};
use crate::parser::SyntaxKind;
use crate::semantic::{DeclarationIndex, DeclarationKind, SemanticModel};
use crate::syntax::{RawSyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia};

/// Registry with every built-in classifier, in the order they should run.
pub fn default_registry() -> Arc<ClassifierRegistry> {
    Arc::new(
        ClassifierRegistry::builder()
            .register(TriviaClassifier)
            .register(SyntacticTokenClassifier)
            .register(DeclarationNameClassifier)
            .register(DirectiveClassifier)
            .build(),
    )
}

fn kind_of(raw: RawSyntaxKind) -> Option<SyntaxKind> {
    SyntaxKind::from_raw(raw)
}

// ============================================================================
// TOKENS
// ============================================================================

/// Keywords, literals, operators, punctuation and doc comment markup.
///
/// Identifiers are left to [`DeclarationNameClassifier`]; directive tokens to
/// [`DirectiveClassifier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticTokenClassifier;

impl SyntacticTokenClassifier {
    fn tag(kind: SyntaxKind) -> Option<&'static str> {
        let tag = match kind {
            SyntaxKind::STRING | SyntaxKind::CHAR => tags::STRING,
            SyntaxKind::INT_NUMBER => tags::NUMBER,
            k if k.is_keyword() => tags::KEYWORD,
            k if k.is_operator() => tags::OPERATOR,
            k if k.is_punct() => tags::PUNCTUATION,
            SyntaxKind::DOC_EXTERIOR
            | SyntaxKind::XML_LT
            | SyntaxKind::XML_LT_SLASH
            | SyntaxKind::XML_GT
            | SyntaxKind::XML_SLASH_GT
            | SyntaxKind::XML_EQ => tags::XML_DOC_DELIMITER,
            SyntaxKind::XML_NAME => tags::XML_DOC_NAME,
            SyntaxKind::XML_TEXT_LITERAL | SyntaxKind::XML_STRING => tags::XML_DOC_TEXT,
            _ => return None,
        };
        Some(tag)
    }
}

impl SyntaxClassifier for SyntacticTokenClassifier {
    fn name(&self) -> &str {
        "syntactic tokens"
    }

    fn token_filter(&self) -> KindFilter {
        KindFilter::Matching(|raw| kind_of(raw).and_then(Self::tag).is_some())
    }

    fn classify_token(
        &self,
        token: &SyntaxToken,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        if let Some(tag) = kind_of(token.kind()).and_then(Self::tag) {
            out.push(ClassifiedSpan::new(token.text_range(), tag));
        }
        Ok(())
    }
}

/// Identifiers, refined by the declaration index when one is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationNameClassifier;

impl SyntaxClassifier for DeclarationNameClassifier {
    fn name(&self) -> &str {
        "declaration names"
    }

    fn token_filter(&self) -> KindFilter {
        KindFilter::from_kinds([SyntaxKind::IDENT])
    }

    fn classify_token(
        &self,
        token: &SyntaxToken,
        model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        let declared = model
            .as_any()
            .downcast_ref::<DeclarationIndex>()
            .and_then(|index| index.lookup(token.text()));
        let tag = match declared {
            Some(DeclarationKind::Namespace) => tags::NAMESPACE_NAME,
            Some(DeclarationKind::Type) => tags::CLASS_NAME,
            Some(DeclarationKind::Method) => tags::METHOD_NAME,
            Some(DeclarationKind::Property) => tags::PROPERTY_NAME,
            Some(DeclarationKind::Field) => tags::FIELD_NAME,
            None => tags::IDENTIFIER,
        };
        out.push(ClassifiedSpan::new(token.text_range(), tag));
        Ok(())
    }
}

// ============================================================================
// TRIVIA
// ============================================================================

/// Plain line and block comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriviaClassifier;

impl SyntaxClassifier for TriviaClassifier {
    fn name(&self) -> &str {
        "comments"
    }

    fn token_filter(&self) -> KindFilter {
        KindFilter::from_kinds([SyntaxKind::LINE_COMMENT, SyntaxKind::BLOCK_COMMENT])
    }

    fn classify_trivia(
        &self,
        trivia: &SyntaxTrivia,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        out.push(ClassifiedSpan::new(trivia.range(), tags::COMMENT));
        Ok(())
    }
}

// ============================================================================
// STRUCTURED TRIVIA
// ============================================================================

/// Preprocessor directives: `#` plus the directive name as one keyword span,
/// the rest of the line as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveClassifier;

impl SyntaxClassifier for DirectiveClassifier {
    fn name(&self) -> &str {
        "directives"
    }

    fn node_filter(&self) -> KindFilter {
        KindFilter::Matching(|raw| kind_of(raw).is_some_and(SyntaxKind::is_directive))
    }

    fn classify_node(
        &self,
        node: &SyntaxNode,
        _model: &dyn SemanticModel,
        _cancel: &CancellationToken,
        out: &mut Vec<ClassifiedSpan>,
    ) -> Result<(), Cancelled> {
        let mut keyword_end = None;
        for token in node.child_tokens() {
            match kind_of(token.kind()) {
                Some(SyntaxKind::HASH)
                | Some(SyntaxKind::REGION_KW)
                | Some(SyntaxKind::ENDREGION_KW)
                | Some(SyntaxKind::DIRECTIVE_NAME) => keyword_end = Some(token.text_range().end()),
                _ => {}
            }
        }
        if let Some(end) = keyword_end {
            let start = node.text_range().start();
            out.push(ClassifiedSpan::new(TextRange::new(start, end), tags::PREPROCESSOR_KEYWORD));
        }
        if let Some(message) = node.child_token(SyntaxKind::PREPROCESSING_MESSAGE.into()) {
            out.push(ClassifiedSpan::new(message.text_range(), tags::PREPROCESSOR_TEXT));
        }
        Ok(())
    }
}
