//! Block span collection.

use tracing::debug;

use super::regions::DirectiveIndex;
use super::{BlockSpan, BlockType, StructureContext, StructureRules};
use crate::base::{CancellationToken, Cancelled, Span, check_cancelled, intersects};
use crate::ide::options::StructureOptions;
use crate::parser::SyntaxKind;
use crate::syntax::{NodeOrToken, SyntaxNode, SyntaxTrivia};

/// Collect the block spans of `root` that intersect `span` and append them
/// to `out`, sorted by start (outer spans first on ties) and well-nested.
///
/// `text` is the document text the tree was parsed from.
pub fn collect_block_spans(
    root: &SyntaxNode,
    text: &str,
    span: Span,
    rules: &StructureRules,
    options: &StructureOptions,
    out: &mut Vec<BlockSpan>,
    cancel: &CancellationToken,
) -> Result<(), Cancelled> {
    let directives = DirectiveIndex::build(root, cancel)?;
    let context = StructureContext {
        text,
        options,
        directives: &directives,
        cancel,
    };

    let mut spans = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        check_cancelled(cancel)?;
        // Regions are visited from the directive index below
        if node.kind() == SyntaxKind::REGION_DIRECTIVE || !intersects(node.full_range(), span) {
            continue;
        }

        for provider in rules.providers(node.kind()) {
            provider.collect(&node, &context, &mut spans)?;
        }

        for child in node.children_and_tokens().iter().rev() {
            match child {
                NodeOrToken::Node(child) => stack.push(child.clone()),
                NodeOrToken::Token(token) => {
                    push_structures(&mut stack, token.trailing_trivia());
                    push_structures(&mut stack, token.leading_trivia());
                }
            }
        }
    }

    // A region can contain the query without its `#region` line touching it
    for region in directives.regions() {
        check_cancelled(cancel)?;
        for provider in rules.providers(region.kind()) {
            provider.collect(region, &context, &mut spans)?;
        }
    }

    spans.retain(|block| intersects(block.text_span, span));
    for block in &mut spans {
        apply_options(block, options);
    }
    spans.sort_by(|a, b| {
        a.text_span
            .start()
            .cmp(&b.text_span.start())
            .then(b.text_span.end().cmp(&a.text_span.end()))
    });
    let before = out.len();
    keep_well_nested(spans, out);
    debug!(?span, count = out.len() - before, "collected block spans");
    Ok(())
}

fn push_structures(stack: &mut Vec<SyntaxNode>, trivia: &[SyntaxTrivia]) {
    for trivia in trivia.iter().rev() {
        if let Some(structure) = trivia.structure() {
            stack.push(structure.clone());
        }
    }
}

/// Drop every span that partially overlaps a span kept before it. Input must
/// be sorted by start, longest first.
fn keep_well_nested(sorted: Vec<BlockSpan>, out: &mut Vec<BlockSpan>) {
    let mut open: Vec<Span> = Vec::new();
    for block in sorted {
        let span = block.text_span;
        while open.last().is_some_and(|outer| outer.end() <= span.start()) {
            open.pop();
        }
        if let Some(outer) = open.last() {
            if span.end() > outer.end() {
                debug!(?span, ?outer, block_type = ?block.block_type, "dropped partially overlapping block span");
                continue;
            }
        }
        open.push(span);
        out.push(block);
    }
}

/// Apply the guide and outlining options to one block.
///
/// Turning guides off for a category makes its blocks nonstructural;
/// turning outlining off makes them non-collapsible.
pub fn apply_options(block: &mut BlockSpan, options: &StructureOptions) {
    let ty = block.block_type;
    let (show_guides, show_outlining) = if ty.is_declaration_level() {
        (
            options.show_block_structure_guides_for_declaration_level,
            options.show_outlining_for_declaration_level,
        )
    } else if ty.is_code_level() {
        (
            options.show_block_structure_guides_for_code_level,
            options.show_outlining_for_code_level,
        )
    } else if ty.is_comment_or_preprocessor_region() {
        (
            options.show_block_structure_guides_for_comments_and_preprocessor_regions,
            options.show_outlining_for_comments_and_preprocessor_regions,
        )
    } else {
        (true, true)
    };

    if !show_guides {
        block.block_type = BlockType::Nonstructural;
    }
    if !show_outlining {
        block.is_collapsible = false;
    }
}
