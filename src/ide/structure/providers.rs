//! Structure providers for the sample language.

use std::sync::Arc;

use super::{BlockSpan, BlockType, ELLIPSIS, StructureContext, StructureProvider, StructureRules};
use crate::base::{Cancelled, TextRange};
use crate::parser::{SyntaxKind, directive_message};
use crate::syntax::{NodeOrToken, SyntaxNode, SyntaxTrivia};

/// Rules for every construct of the sample language that outlines.
pub fn default_rules() -> Arc<StructureRules> {
    let mut rules = StructureRules::new();
    rules
        .add(
            [SyntaxKind::NAMESPACE_DECLARATION],
            Arc::new(BracedBody::new(BlockType::Namespace, false)),
        )
        .add(
            [
                SyntaxKind::CLASS_DECLARATION,
                SyntaxKind::STRUCT_DECLARATION,
                SyntaxKind::INTERFACE_DECLARATION,
                SyntaxKind::ENUM_DECLARATION,
            ],
            Arc::new(BracedBody::new(BlockType::Type, false)),
        )
        .add(
            [SyntaxKind::METHOD_DECLARATION, SyntaxKind::PROPERTY_DECLARATION],
            Arc::new(BracedBody::new(BlockType::Member, true)),
        )
        .add(
            [SyntaxKind::IF_STATEMENT, SyntaxKind::ELSE_CLAUSE],
            Arc::new(BracedBody::new(BlockType::Conditional, false)),
        )
        .add(
            [SyntaxKind::WHILE_STATEMENT, SyntaxKind::FOR_STATEMENT],
            Arc::new(BracedBody::new(BlockType::Loop, false)),
        )
        .add(
            [SyntaxKind::EXPRESSION],
            Arc::new(BracedBody::new(BlockType::Expression, false)),
        )
        .add(
            [SyntaxKind::OBJECT_CREATION],
            Arc::new(BracedBody::new(BlockType::Nonstructural, false)),
        )
        .add([SyntaxKind::BLOCK], Arc::new(NestedBlocks))
        .add([SyntaxKind::REGION_DIRECTIVE], Arc::new(Regions))
        .add([SyntaxKind::COMPILATION_UNIT, SyntaxKind::MEMBER_LIST], Arc::new(Imports))
        .add([SyntaxKind::DOC_COMMENT_ROOT], Arc::new(DocComments))
        .add_for_every_node(Arc::new(Comments));
    Arc::new(rules)
}

fn kind_of(node: &SyntaxNode) -> Option<SyntaxKind> {
    SyntaxKind::from_raw(node.kind())
}

/// Kinds that hold the brace-delimited body of a construct
const BODY_KINDS: &[SyntaxKind] = &[
    SyntaxKind::MEMBER_LIST,
    SyntaxKind::ACCESSOR_LIST,
    SyntaxKind::BLOCK,
    SyntaxKind::INITIALIZER,
];

/// A construct with a header followed by a braced body.
///
/// The block collapses from the end of the header to the end of the body;
/// the hint covers the whole construct up to the end of the body.
struct BracedBody {
    block_type: BlockType,
    auto_collapse: bool,
}

impl BracedBody {
    fn new(block_type: BlockType, auto_collapse: bool) -> Self {
        Self {
            block_type,
            auto_collapse,
        }
    }
}

impl StructureProvider for BracedBody {
    fn collect(
        &self,
        node: &SyntaxNode,
        context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled> {
        let children = node.children_and_tokens();
        let body = children.iter().enumerate().find_map(|(i, child)| {
            let child = child.as_node()?;
            kind_of(child).filter(|k| BODY_KINDS.contains(k)).map(|_| (i, child))
        });
        let Some((index, body)) = body else {
            return Ok(());
        };
        let body_range = body.text_range();
        if body_range.is_empty() {
            return Ok(());
        }

        let start = node.text_range().start();
        let header_end = match index {
            0 => body_range.start(),
            i => children[i - 1].text_range().end(),
        };
        let header = TextRange::new(start, header_end);
        let banner = match context.banner(header) {
            banner if banner.is_empty() => ELLIPSIS.to_string(),
            banner => banner,
        };

        out.push(
            BlockSpan::new(
                self.block_type,
                TextRange::new(header_end, body_range.end()),
                TextRange::new(start, body_range.end()),
                banner,
            )
            .with_auto_collapse(self.auto_collapse),
        );
        Ok(())
    }
}

/// `{ ... }` statements nested directly in a block.
struct NestedBlocks;

impl StructureProvider for NestedBlocks {
    fn collect(
        &self,
        node: &SyntaxNode,
        _context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled> {
        for block in node
            .child_nodes()
            .filter(|child| child.kind() == SyntaxKind::BLOCK)
        {
            let range = block.text_range();
            out.push(BlockSpan::new(BlockType::Statement, range, range, ELLIPSIS));
        }
        Ok(())
    }
}

/// `#region` through the matching `#endregion`.
struct Regions;

impl StructureProvider for Regions {
    fn collect(
        &self,
        node: &SyntaxNode,
        context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled> {
        let Some(end) = context.directives.matching_end(node) else {
            return Ok(());
        };
        let span = TextRange::new(node.text_range().start(), end.text_range().end());
        let banner = match directive_message(node) {
            Some(message) => super::truncate_banner(message, context.options.maximum_banner_length),
            None => "#region".to_string(),
        };
        out.push(
            BlockSpan::new(BlockType::PreprocessorRegion, span, span, banner)
                .with_auto_collapse(context.options.collapse_regions_when_collapsing_to_definitions)
                .with_default_collapsed(context.options.collapse_regions_when_first_opened),
        );
        Ok(())
    }
}

/// Groups of two or more adjacent `using` directives.
struct Imports;

impl StructureProvider for Imports {
    fn collect(
        &self,
        node: &SyntaxNode,
        context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled> {
        let mut run: Vec<&SyntaxNode> = Vec::new();
        for child in node.children_and_tokens() {
            match child.as_node() {
                Some(using) if using.kind() == SyntaxKind::USING_DIRECTIVE => run.push(using),
                _ => {
                    push_imports(&run, context, out);
                    run.clear();
                }
            }
        }
        push_imports(&run, context, out);
        Ok(())
    }
}

fn push_imports(run: &[&SyntaxNode], context: &StructureContext<'_>, out: &mut Vec<BlockSpan>) {
    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        return;
    };
    if run.len() < 2 {
        return;
    }
    let keyword_end = first
        .first_token()
        .map_or(first.text_range().start(), |t| t.text_range().end());
    let end = last.text_range().end();
    out.push(
        BlockSpan::new(
            BlockType::Imports,
            TextRange::new(keyword_end, end),
            TextRange::new(first.text_range().start(), end),
            ELLIPSIS,
        )
        .with_auto_collapse(true)
        .with_default_collapsed(context.options.collapse_imports_when_first_opened),
    );
}

/// Documentation comments spanning more than one line.
struct DocComments;

impl StructureProvider for DocComments {
    fn collect(
        &self,
        node: &SyntaxNode,
        context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled> {
        let span = node.text_range();
        if !spans_lines(context, span) {
            return Ok(());
        }
        let banner = format!("{} {}", context.banner(span), ELLIPSIS);
        out.push(BlockSpan::new(BlockType::Comment, span, span, banner).with_auto_collapse(true));
        Ok(())
    }
}

fn spans_lines(context: &StructureContext<'_>, span: TextRange) -> bool {
    context
        .text
        .get(std::ops::Range::<usize>::from(span))
        .is_some_and(|text| text.contains('\n'))
}

/// Runs of two or more line comments, and multi-line block comments, in the
/// trivia of a node's own tokens.
struct Comments;

impl StructureProvider for Comments {
    fn collect(
        &self,
        node: &SyntaxNode,
        context: &StructureContext<'_>,
        out: &mut Vec<BlockSpan>,
    ) -> Result<(), Cancelled> {
        for child in node.children_and_tokens() {
            if let NodeOrToken::Token(token) = child {
                comment_blocks(token.leading_trivia(), context, out);
                comment_blocks(token.trailing_trivia(), context, out);
            }
        }
        Ok(())
    }
}

fn comment_blocks(trivia: &[SyntaxTrivia], context: &StructureContext<'_>, out: &mut Vec<BlockSpan>) {
    let mut run: Option<(TextRange, TextRange)> = None;
    let mut newlines = 0;

    for piece in trivia {
        match SyntaxKind::from_raw(piece.kind()) {
            Some(SyntaxKind::LINE_COMMENT) => {
                run = Some(match run {
                    Some((first, _)) => (first, piece.range()),
                    None => (piece.range(), piece.range()),
                });
                newlines = 0;
            }
            Some(SyntaxKind::WHITESPACE) => {}
            Some(SyntaxKind::NEWLINE) => {
                newlines += 1;
                // A blank line ends the run
                if newlines > 1 {
                    push_comment_run(run.take(), context, out);
                }
            }
            kind => {
                push_comment_run(run.take(), context, out);
                newlines = 0;
                if kind == Some(SyntaxKind::BLOCK_COMMENT) && spans_lines(context, piece.range()) {
                    let span = piece.range();
                    let banner = format!("{} {}", context.banner(span), ELLIPSIS);
                    out.push(BlockSpan::new(BlockType::Comment, span, span, banner).with_auto_collapse(true));
                }
            }
        }
    }
    push_comment_run(run, context, out);
}

fn push_comment_run(run: Option<(TextRange, TextRange)>, context: &StructureContext<'_>, out: &mut Vec<BlockSpan>) {
    let Some((first, last)) = run else {
        return;
    };
    if first == last {
        return;
    }
    let span = TextRange::new(first.start(), last.end());
    let banner = format!("{} {}", context.banner(first), ELLIPSIS);
    out.push(BlockSpan::new(BlockType::Comment, span, span, banner).with_auto_collapse(true));
}
