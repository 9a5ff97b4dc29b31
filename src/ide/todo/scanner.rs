use tracing::debug;
use unicode_ident::is_xid_continue;

use super::{TodoComment, TodoCommentDescriptor};
use crate::base::{CancellationToken, Cancelled, LineIndex, TextRange, TextSize, check_cancelled};
use crate::parser::SyntaxKind;
use crate::syntax::{NodeOrToken, SyntaxNode, SyntaxTrivia};

enum Item {
    Node(SyntaxNode),
    Trivia(SyntaxTrivia),
}

/// Find the todo comments of a document, in document order.
///
/// Every comment trivia is examined, including trivia nested in structured
/// trivia. Each line of a comment is matched on its own; a line matches a
/// descriptor when, after the comment delimiter and any whitespace, it starts
/// with the descriptor text (ignoring case) not followed by an identifier
/// character.
pub fn scan(
    root: &SyntaxNode,
    text: &str,
    line_index: &LineIndex,
    descriptors: &[TodoCommentDescriptor],
    cancel: &CancellationToken,
) -> Result<Vec<TodoComment>, Cancelled> {
    let mut out = Vec::new();
    if descriptors.is_empty() {
        return Ok(out);
    }

    let mut stack = vec![Item::Node(root.clone())];
    while let Some(item) = stack.pop() {
        check_cancelled(cancel)?;
        match item {
            Item::Node(node) => {
                for child in node.children_and_tokens().iter().rev() {
                    match child {
                        NodeOrToken::Node(child) => stack.push(Item::Node(child.clone())),
                        NodeOrToken::Token(token) => {
                            let trivia = token.leading_trivia().iter().chain(token.trailing_trivia());
                            stack.extend(trivia.rev().cloned().map(Item::Trivia));
                        }
                    }
                }
            }
            Item::Trivia(trivia) => {
                if let Some(structure) = trivia.structure() {
                    stack.push(Item::Node(structure.clone()));
                }
                if let Some(kind) = SyntaxKind::from_raw(trivia.kind()).filter(|k| k.is_comment()) {
                    scan_comment(kind, trivia.range(), text, line_index, descriptors, &mut out);
                }
            }
        }
    }

    debug!(found = out.len(), "scanned todo comments");
    Ok(out)
}

fn scan_comment(
    kind: SyntaxKind,
    range: TextRange,
    text: &str,
    line_index: &LineIndex,
    descriptors: &[TodoCommentDescriptor],
    out: &mut Vec<TodoComment>,
) {
    let first = line_index.line_of(range.start());
    let last = line_index.line_of(range.end());

    for line in first..=last {
        let Some(line_range) = line_index.line_range(line) else {
            break;
        };
        let start = line_range.start().max(range.start());
        let end = line_range.end().min(range.end());
        if start > end {
            continue;
        }
        let Some(mut body) = text.get(std::ops::Range::<usize>::from(TextRange::new(start, end))) else {
            continue;
        };
        let mut offset = start;

        if kind == SyntaxKind::BLOCK_COMMENT {
            if line == first && body.starts_with("/*") {
                body = advance(body, 2, &mut offset);
            }
            if line == last {
                body = body.strip_suffix("*/").unwrap_or(body);
            }
        } else {
            body = advance(body, body.len() - body.trim_start().len(), &mut offset);
            let delimiter = if body.starts_with("///") { 3 } else if body.starts_with("//") { 2 } else { 0 };
            body = advance(body, delimiter, &mut offset);
        }

        scan_line(body, offset, descriptors, out);
    }
}

fn advance<'a>(text: &'a str, len: usize, offset: &mut TextSize) -> &'a str {
    *offset += TextSize::from(len as u32);
    &text[len..]
}

fn scan_line(line: &str, offset: TextSize, descriptors: &[TodoCommentDescriptor], out: &mut Vec<TodoComment>) {
    let trimmed = line.trim_start();
    let position = offset + TextSize::from((line.len() - trimmed.len()) as u32);

    for descriptor in descriptors {
        let Some(len) = prefix_len_ignore_case(trimmed, &descriptor.text) else {
            continue;
        };
        if trimmed[len..].chars().next().is_some_and(is_xid_continue) {
            continue;
        }
        out.push(TodoComment {
            descriptor: descriptor.clone(),
            message: trimmed.trim_end().to_string(),
            position,
        });
        return;
    }
}

/// Byte length of the prefix of `text` equal to `word` ignoring case.
fn prefix_len_ignore_case(text: &str, word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    let mut chars = text.char_indices();
    for expected in word.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(text.len(), |(i, _)| i))
}
