//! Structure of `///` documentation comments.
//!
//! A documentation comment is a run of `///` lines holding a lenient XML
//! dialect. The structure is a `DOC_COMMENT_ROOT` node whose children are
//! `DOC_EXTERIOR` tokens (the `///` markers), `XML_TEXT` nodes and XML
//! elements. Line breaks and indentation between lines are trivia.
//!
//! The XML parser never fails: unknown markup becomes text, unterminated tags
//! end at the end of their line, and unmatched end tags stand alone.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use crate::base::TextSize;
use crate::syntax::{SyntaxNode, SyntaxToken, SyntaxTrivia, TreeBuilder};

#[derive(Debug, Clone, Copy)]
struct Piece {
    kind: SyntaxKind,
    start: usize,
    end: usize,
}

#[derive(Debug)]
enum DocItem {
    Exterior,
    Text,
    StartTag {
        len: usize,
        name: SmolStr,
        self_closing: bool,
    },
    EndTag {
        len: usize,
        name: SmolStr,
    },
}

/// Parse the text of a merged documentation comment starting at `offset`.
pub(super) fn parse_doc_comment(text: &str, offset: TextSize) -> SyntaxNode {
    let mut lexer = DocLexer {
        text,
        pieces: Vec::new(),
        items: Vec::new(),
    };
    lexer.lex();

    let tokens = make_tokens(text, offset, &lexer.pieces);
    build_tree(offset, &lexer.items, tokens)
}

// ============================================================================
// LEXING
// ============================================================================

struct DocLexer<'a> {
    text: &'a str,
    pieces: Vec<Piece>,
    items: Vec<DocItem>,
}

impl DocLexer<'_> {
    fn lex(&mut self) {
        let bytes = self.text.as_bytes();
        let mut p = 0;
        while p < bytes.len() {
            if self.text[p..].starts_with("///") {
                self.token(SyntaxKind::DOC_EXTERIOR, p, p + 3);
                self.items.push(DocItem::Exterior);
                let line_end = self.text[p..].find(['\r', '\n']).map_or(bytes.len(), |i| p + i);
                self.line_content(p + 3, line_end);
                p = line_end;
            } else if bytes[p] == b'\r' || bytes[p] == b'\n' {
                let end = if self.text[p..].starts_with("\r\n") { p + 2 } else { p + 1 };
                self.trivia(SyntaxKind::NEWLINE, p, end);
                p = end;
            } else {
                let end = p + ws_len(&self.text[p..]).max(1);
                self.trivia(SyntaxKind::WHITESPACE, p, end);
                p = end;
            }
        }
    }

    fn token(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        self.pieces.push(Piece { kind, start, end });
    }

    fn trivia(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        debug_assert!(kind.is_trivia());
        if end > start {
            self.pieces.push(Piece { kind, start, end });
        }
    }

    fn line_content(&mut self, start: usize, end: usize) {
        let mut p = start;
        while p < end {
            let at_angle = self.text.as_bytes()[p] == b'<';
            if at_angle {
                if let Some(next) = self.tag(p, end) {
                    p = next;
                    continue;
                }
            }
            // A stray `<` is text; skip it so the run makes progress
            let from = if at_angle { p + 1 } else { p };
            let run_end = self.text[from..end].find('<').map_or(end, |i| from + i);
            self.text_run(p, run_end);
            p = run_end;
        }
    }

    /// Text between tags. Surrounding whitespace is trivia.
    fn text_run(&mut self, start: usize, end: usize) {
        let segment = &self.text[start..end];
        let content_start = start + ws_len(segment);
        let content_end = start + segment.trim_end().len();
        if content_end <= content_start {
            self.trivia(SyntaxKind::WHITESPACE, start, end);
            return;
        }
        self.trivia(SyntaxKind::WHITESPACE, start, content_start);
        self.token(SyntaxKind::XML_TEXT_LITERAL, content_start, content_end);
        self.items.push(DocItem::Text);
        self.trivia(SyntaxKind::WHITESPACE, content_end, end);
    }

    /// Try to lex a tag at `p`. Returns the position after it.
    fn tag(&mut self, p: usize, end: usize) -> Option<usize> {
        let text = self.text;
        let closing = text[p + 1..end].starts_with('/');
        let name_start = if closing { p + 2 } else { p + 1 };
        let name_end = name_start + xml_name_len(&text[name_start..end]);
        if name_end == name_start {
            return None;
        }

        let first = self.pieces.len();
        let open_kind = if closing {
            SyntaxKind::XML_LT_SLASH
        } else {
            SyntaxKind::XML_LT
        };
        self.token(open_kind, p, name_start);
        self.token(SyntaxKind::XML_NAME, name_start, name_end);
        let name = SmolStr::new(&text[name_start..name_end]);

        let mut i = name_end;
        let mut self_closing = false;
        while i < end {
            let ws = ws_len(&text[i..end]);
            self.trivia(SyntaxKind::WHITESPACE, i, i + ws);
            i += ws;
            let rest = &text[i..end];
            if rest.is_empty() {
                break;
            }
            if rest.starts_with("/>") && !closing {
                self.token(SyntaxKind::XML_SLASH_GT, i, i + 2);
                self_closing = true;
                i += 2;
                break;
            }
            if rest.starts_with('>') {
                self.token(SyntaxKind::XML_GT, i, i + 1);
                i += 1;
                break;
            }
            if closing {
                break;
            }
            match self.attribute(i, end) {
                Some(next) => i = next,
                None => break,
            }
        }

        let len = self.pieces[first..]
            .iter()
            .filter(|piece| !piece.kind.is_trivia())
            .count();
        self.items.push(if closing {
            DocItem::EndTag { len, name }
        } else {
            DocItem::StartTag {
                len,
                name,
                self_closing,
            }
        });
        Some(i)
    }

    /// `name = "value"`; returns the position after the attribute.
    fn attribute(&mut self, start: usize, end: usize) -> Option<usize> {
        let text = self.text;
        let name_end = start + xml_name_len(&text[start..end]);
        if name_end == start {
            return None;
        }
        self.token(SyntaxKind::XML_NAME, start, name_end);

        let mut i = name_end;
        let ws = ws_len(&text[i..end]);
        if !text[i + ws..end].starts_with('=') {
            return Some(i);
        }
        self.trivia(SyntaxKind::WHITESPACE, i, i + ws);
        i += ws;
        self.token(SyntaxKind::XML_EQ, i, i + 1);
        i += 1;

        let ws = ws_len(&text[i..end]);
        self.trivia(SyntaxKind::WHITESPACE, i, i + ws);
        i += ws;
        if let Some(quote) = text[i..end].chars().next().filter(|c| *c == '"' || *c == '\'') {
            let close = text[i + 1..end].find(quote).map_or(end, |j| i + 1 + j + 1);
            self.token(SyntaxKind::XML_STRING, i, close);
            i = close;
        }
        Some(i)
    }
}

fn ws_len(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

fn xml_name_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')))
        .map_or(text.len(), |(i, _)| i)
}

// ============================================================================
// TREE BUILDING
// ============================================================================

/// Turn pieces into tokens. Trivia lead the following token; trivia after the
/// last token trail it.
fn make_tokens(text: &str, offset: TextSize, pieces: &[Piece]) -> Vec<SyntaxToken> {
    let at = |i: usize| offset + TextSize::from(i as u32);
    let mut tokens = Vec::new();
    let mut pending: Option<(Piece, Vec<SyntaxTrivia>)> = None;
    let mut trivia = Vec::new();

    for piece in pieces {
        if piece.kind.is_trivia() {
            trivia.push(SyntaxTrivia::new(
                piece.kind.into(),
                at(piece.start),
                &text[piece.start..piece.end],
            ));
            continue;
        }
        if let Some((prev, leading)) = pending.take() {
            tokens.push(SyntaxToken::new(
                prev.kind.into(),
                at(prev.start),
                &text[prev.start..prev.end],
                leading,
                Vec::new(),
            ));
        }
        pending = Some((*piece, std::mem::take(&mut trivia)));
    }

    if let Some((prev, leading)) = pending {
        tokens.push(SyntaxToken::new(
            prev.kind.into(),
            at(prev.start),
            &text[prev.start..prev.end],
            leading,
            trivia,
        ));
    }
    tokens
}

fn build_tree(offset: TextSize, items: &[DocItem], tokens: Vec<SyntaxToken>) -> SyntaxNode {
    if tokens.is_empty() {
        return SyntaxNode::new(SyntaxKind::DOC_COMMENT_ROOT.into(), offset, Vec::new());
    }

    let mut tokens = tokens.into_iter();
    let mut builder = TreeBuilder::new();
    let mut open: Vec<&str> = Vec::new();

    builder.start_node(SyntaxKind::DOC_COMMENT_ROOT.into());

    for item in items {
        match item {
            DocItem::Exterior => {
                if let Some(token) = tokens.next() {
                    builder.token(token);
                }
            }
            DocItem::Text => {
                builder.start_node(SyntaxKind::XML_TEXT.into());
                if let Some(token) = tokens.next() {
                    builder.token(token);
                }
                builder.finish_node();
            }
            DocItem::StartTag {
                len,
                self_closing: true,
                ..
            } => {
                builder.start_node(SyntaxKind::XML_EMPTY_ELEMENT.into());
                tag_tokens(&mut builder, &mut tokens, *len);
                builder.finish_node();
            }
            DocItem::StartTag { len, name, .. } => {
                builder.start_node(SyntaxKind::XML_ELEMENT.into());
                builder.start_node(SyntaxKind::XML_START_TAG.into());
                tag_tokens(&mut builder, &mut tokens, *len);
                builder.finish_node();
                open.push(name.as_str());
            }
            DocItem::EndTag { len, name } => {
                let matching = open.iter().rposition(|n| *n == name.as_str());
                if let Some(depth) = matching {
                    // Close elements opened inside the matching one first
                    while open.len() > depth + 1 {
                        open.pop();
                        builder.finish_node();
                    }
                }
                builder.start_node(SyntaxKind::XML_END_TAG.into());
                tag_tokens(&mut builder, &mut tokens, *len);
                builder.finish_node();
                if matching.is_some() {
                    open.pop();
                    builder.finish_node();
                }
            }
        }
    }

    for _ in open.drain(..) {
        builder.finish_node();
    }
    builder.finish_node();
    builder.finish()
}

/// Emit `len` tag tokens, grouping `name = "value"` runs into attributes.
fn tag_tokens(
    builder: &mut TreeBuilder,
    tokens: &mut std::vec::IntoIter<SyntaxToken>,
    len: usize,
) {
    let mut remaining = len;
    let mut seen_name = false;
    let mut in_attribute = false;

    while remaining > 0 {
        let Some(token) = tokens.next() else { break };
        remaining -= 1;
        let kind = SyntaxKind::from_raw(token.kind()).unwrap_or(SyntaxKind::ERROR_TOKEN);

        match kind {
            SyntaxKind::XML_NAME if seen_name => {
                if in_attribute {
                    builder.finish_node();
                }
                builder.start_node(SyntaxKind::XML_ATTRIBUTE.into());
                in_attribute = true;
            }
            SyntaxKind::XML_NAME => seen_name = true,
            SyntaxKind::XML_GT | SyntaxKind::XML_SLASH_GT if in_attribute => {
                builder.finish_node();
                in_attribute = false;
            }
            _ => {}
        }
        builder.token(token);
    }

    if in_attribute {
        builder.finish_node();
    }
}
