//! Structure of preprocessor directive trivia (`#region`, `#endregion`, ...).

use super::syntax_kind::SyntaxKind;
use crate::base::TextSize;
use crate::syntax::{SyntaxNode, SyntaxToken, SyntaxTrivia, TreeBuilder};

/// Parse one directive line (starting with `#`) into a structure node.
///
/// - `#region <message>` → `REGION_DIRECTIVE`
/// - `#endregion <message>` → `END_REGION_DIRECTIVE`
/// - anything else → `OTHER_DIRECTIVE`
///
/// A `//` comment ending a directive line becomes comment trivia inside the
/// structure. Directives whose rest of line is a free message keep it whole.
pub(super) fn parse_directive(text: &str, offset: TextSize) -> SyntaxNode {
    debug_assert!(text.starts_with('#'));
    let at = |i: usize| offset + TextSize::from(i as u32);

    let after_hash = 1;
    let name_start = after_hash + leading_ws(&text[after_hash..]);
    let name_end = name_start
        + text[name_start..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len() - name_start);
    let name = &text[name_start..name_end];

    let (node_kind, name_kind) = match name {
        "region" => (SyntaxKind::REGION_DIRECTIVE, SyntaxKind::REGION_KW),
        "endregion" => (SyntaxKind::END_REGION_DIRECTIVE, SyntaxKind::ENDREGION_KW),
        _ => (SyntaxKind::OTHER_DIRECTIVE, SyntaxKind::DIRECTIVE_NAME),
    };

    let mut builder = TreeBuilder::new();
    builder.start_node(node_kind.into());

    if name.is_empty() {
        // `#` alone, or `#` followed by something that is not a name
        let rest = &text[after_hash..];
        let mut trailing = Vec::new();
        if !rest.is_empty() {
            trailing.push(SyntaxTrivia::new(
                SyntaxKind::WHITESPACE.into(),
                at(after_hash),
                rest,
            ));
        }
        builder.token(SyntaxToken::new(SyntaxKind::HASH.into(), offset, "#", Vec::new(), trailing));
        builder.finish_node();
        return builder.finish();
    }

    builder.token(SyntaxToken::new(SyntaxKind::HASH.into(), offset, "#", Vec::new(), Vec::new()));

    let mut name_leading = Vec::new();
    if name_start > after_hash {
        name_leading.push(SyntaxTrivia::new(
            SyntaxKind::WHITESPACE.into(),
            at(after_hash),
            &text[after_hash..name_start],
        ));
    }

    let body_end = if has_free_message(name) {
        text.len()
    } else {
        text[name_end..].find("//").map_or(text.len(), |i| name_end + i)
    };
    let body = &text[..body_end];
    let comment = (body_end < text.len())
        .then(|| SyntaxTrivia::new(SyntaxKind::LINE_COMMENT.into(), at(body_end), &text[body_end..]));

    let message_start = name_end + leading_ws(&body[name_end..]);
    let message_end = body.trim_end().len().max(message_start);

    let mut name_trailing = Vec::new();
    if message_start > name_end {
        name_trailing.push(SyntaxTrivia::new(
            SyntaxKind::WHITESPACE.into(),
            at(name_end),
            &body[name_end..message_start],
        ));
    }

    if message_end > message_start {
        builder.token(SyntaxToken::new(
            name_kind.into(),
            at(name_start),
            name,
            name_leading,
            name_trailing,
        ));
        let mut trailing = Vec::new();
        if body.len() > message_end {
            trailing.push(SyntaxTrivia::new(
                SyntaxKind::WHITESPACE.into(),
                at(message_end),
                &body[message_end..],
            ));
        }
        trailing.extend(comment);
        builder.token(SyntaxToken::new(
            SyntaxKind::PREPROCESSING_MESSAGE.into(),
            at(message_start),
            &body[message_start..message_end],
            Vec::new(),
            trailing,
        ));
    } else {
        name_trailing.extend(comment);
        builder.token(SyntaxToken::new(
            name_kind.into(),
            at(name_start),
            name,
            name_leading,
            name_trailing,
        ));
    }

    builder.finish_node();
    builder.finish()
}

/// Directives taking the rest of the line as text, `//` included.
fn has_free_message(name: &str) -> bool {
    matches!(name, "region" | "endregion" | "error" | "warning")
}

fn leading_ws(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

/// Message of a region or endregion directive node, if any.
pub fn directive_message(directive: &SyntaxNode) -> Option<&str> {
    directive
        .child_token(SyntaxKind::PREPROCESSING_MESSAGE.into())
        .map(|t| t.text())
}
