//! Attaching trivia to tokens.
//!
//! A token owns the trivia on the same line after it (up to and including the
//! line break) as trailing trivia. Everything else before a token is leading
//! trivia. Directives and documentation comments become structured trivia.

use std::mem;

use super::directive::parse_directive;
use super::doc_comment::parse_doc_comment;
use super::lexer::Token;
use super::syntax_kind::SyntaxKind;
use crate::base::{TextRange, TextSize};
use crate::syntax::{SyntaxToken, SyntaxTrivia};

/// Convert the flat lexer output into significant tokens with attached
/// trivia. The last token is always an empty `EOF` token owning the trivia at
/// the end of the file.
pub(super) fn attach_trivia(source: &str, raw: &[Token<'_>]) -> Vec<SyntaxToken> {
    let mut tokens = Vec::new();
    let mut leading = Vec::new();
    let mut i = 0;

    loop {
        while i < raw.len() && raw[i].kind.is_trivia() {
            let (trivia, next) = read_trivia(source, raw, i);
            leading.push(trivia);
            i = next;
        }

        let Some(token) = raw.get(i) else {
            tokens.push(SyntaxToken::new(
                SyntaxKind::EOF.into(),
                TextSize::of(source),
                "",
                leading,
                Vec::new(),
            ));
            return tokens;
        };
        i += 1;

        let mut trailing = Vec::new();
        while let Some(next) = raw.get(i) {
            match next.kind {
                SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => {
                    trailing.push(plain(next));
                    i += 1;
                }
                SyntaxKind::NEWLINE => {
                    trailing.push(plain(next));
                    i += 1;
                    break;
                }
                _ => break,
            }
        }

        tokens.push(SyntaxToken::new(
            token.kind.into(),
            token.offset,
            token.text,
            mem::take(&mut leading),
            trailing,
        ));
    }
}

fn plain(token: &Token<'_>) -> SyntaxTrivia {
    SyntaxTrivia::new(token.kind.into(), token.offset, token.text)
}

/// Read one trivia starting at `raw[i]`, returning it and the next index.
fn read_trivia(source: &str, raw: &[Token<'_>], i: usize) -> (SyntaxTrivia, usize) {
    let token = &raw[i];
    match token.kind {
        SyntaxKind::DIRECTIVE => {
            let structure = parse_directive(token.text, token.offset);
            (plain(token).with_structure(structure), i + 1)
        }
        SyntaxKind::DOC_COMMENT => {
            let last = doc_comment_run_end(raw, i);
            let range = TextRange::new(token.offset, raw[last].end());
            let text = &source[range];
            let structure = parse_doc_comment(text, token.offset);
            let trivia = SyntaxTrivia::new(SyntaxKind::DOC_COMMENT.into(), token.offset, text)
                .with_structure(structure);
            (trivia, last + 1)
        }
        _ => (plain(token), i + 1),
    }
}

/// Index of the last `///` line of the documentation comment starting at `i`.
///
/// Lines separated only by a line break and indentation belong together.
fn doc_comment_run_end(raw: &[Token<'_>], i: usize) -> usize {
    let kind_at = |j: usize| raw.get(j).map(|t| t.kind);
    let mut last = i;
    loop {
        if kind_at(last + 1) != Some(SyntaxKind::NEWLINE) {
            return last;
        }
        match (kind_at(last + 2), kind_at(last + 3)) {
            (Some(SyntaxKind::DOC_COMMENT), _) => last += 2,
            (Some(SyntaxKind::WHITESPACE), Some(SyntaxKind::DOC_COMMENT)) => last += 3,
            _ => return last,
        }
    }
}
