//! Recursive descent parser for the sample brace language
//!
//! Builds a [`SyntaxNode`] tree from tokens with attached trivia.
//! Supports error recovery: parsing always produces a tree covering the whole
//! input, with errors collected on the side.

use thiserror::Error;

use super::lexer::tokenize;
use super::syntax_kind::SyntaxKind;
use super::trivia::attach_trivia;
use crate::base::TextRange;
use crate::syntax::{Checkpoint, SyntaxNode, SyntaxToken, TreeBuilder};

/// Parse result containing the tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    root: SyntaxNode,
    pub errors: Vec<ParseError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        self.root.clone()
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {range:?}")]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source code into a tree
pub fn parse(input: &str) -> Parse {
    let tokens = attach_trivia(input, &tokenize(input));
    let mut parser = Parser::new(tokens);
    parser.parse_compilation_unit();
    parser.finish()
}

/// Tokens that end an expression at nesting depth zero
const EXPRESSION_END: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::COMMA,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACKET,
    SyntaxKind::L_BRACE,
    SyntaxKind::R_BRACE,
    SyntaxKind::EOF,
];

/// Keywords that start a statement or declaration; expressions stop there
const STATEMENT_START: &[SyntaxKind] = &[
    SyntaxKind::IF_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::WHILE_KW,
    SyntaxKind::FOR_KW,
    SyntaxKind::RETURN_KW,
    SyntaxKind::BREAK_KW,
    SyntaxKind::CONTINUE_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::USING_KW,
];

/// The parser state
struct Parser {
    tokens: Vec<SyntaxToken>,
    kinds: Vec<SyntaxKind>,
    pos: usize,
    builder: TreeBuilder,
    errors: Vec<ParseError>,
}

impl Parser {
    fn new(tokens: Vec<SyntaxToken>) -> Self {
        let kinds = tokens
            .iter()
            .map(|t| SyntaxKind::from_raw(t.kind()).unwrap_or(SyntaxKind::ERROR_TOKEN))
            .collect();
        Self {
            tokens,
            kinds,
            pos: 0,
            builder: TreeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            root: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // The last token is always EOF
        let last = self.kinds.len() - 1;
        self.kinds[(self.pos + n).min(last)]
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if self.at_eof() {
            return;
        }
        self.builder.token(self.tokens[self.pos].clone());
        self.pos += 1;
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self.tokens[self.pos.min(self.tokens.len() - 1)].text_range();
        self.errors.push(ParseError::new(message, range));
    }

    /// Wrap the current token in an ERROR node. Always makes progress unless
    /// at EOF.
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_compilation_unit(&mut self) {
        self.start_node(SyntaxKind::COMPILATION_UNIT);
        while !self.at_eof() {
            if self.at(SyntaxKind::R_BRACE) {
                self.error_bump("unexpected '}'");
                continue;
            }
            self.parse_member();
        }
        // EOF carries the trivia at the end of the file
        self.builder.token(self.tokens[self.pos].clone());
        self.finish_node();
    }

    /// `{ members }` of a namespace or type
    fn parse_member_list(&mut self) {
        self.start_node(SyntaxKind::MEMBER_LIST);
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                self.parse_member();
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
    }

    fn parse_member(&mut self) {
        let start = self.pos;
        match self.current_kind() {
            SyntaxKind::USING_KW => self.parse_using_directive(),
            SyntaxKind::NAMESPACE_KW => self.parse_namespace(),
            _ => self.parse_type_or_member(),
        }
        if self.pos == start {
            self.error_bump(format!("unexpected {:?}", self.current_kind()));
        }
    }

    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        self.bump();
        self.parse_qualified_name();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECLARATION);
        self.bump();
        self.parse_qualified_name();
        if !self.eat(SyntaxKind::SEMICOLON) {
            self.parse_member_list();
        }
        self.finish_node();
    }

    fn parse_modifiers(&mut self) {
        if self.current_kind().is_modifier() {
            self.start_node(SyntaxKind::MODIFIER_LIST);
            while self.current_kind().is_modifier() {
                self.bump();
            }
            self.finish_node();
        }
    }

    fn parse_type_or_member(&mut self) {
        let checkpoint = self.checkpoint();
        let start = self.pos;
        self.parse_modifiers();

        let declaration = match self.current_kind() {
            SyntaxKind::CLASS_KW => Some(SyntaxKind::CLASS_DECLARATION),
            SyntaxKind::STRUCT_KW => Some(SyntaxKind::STRUCT_DECLARATION),
            SyntaxKind::INTERFACE_KW => Some(SyntaxKind::INTERFACE_DECLARATION),
            SyntaxKind::ENUM_KW => Some(SyntaxKind::ENUM_DECLARATION),
            _ => None,
        };
        if let Some(kind) = declaration {
            self.start_node_at(checkpoint, kind);
            self.parse_type_declaration_rest(kind);
            self.finish_node();
            return;
        }

        // Constructor: `Name(...)`
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::METHOD_DECLARATION);
            self.bump();
            self.parse_method_rest();
            self.finish_node();
            return;
        }

        if !self.at_type_start() {
            if self.pos > start {
                self.start_node_at(checkpoint, SyntaxKind::ERROR);
                self.error("expected declaration after modifiers");
                self.finish_node();
            }
            return;
        }

        self.parse_type_ref();
        let kind = match (self.current_kind(), self.nth(1)) {
            (SyntaxKind::IDENT, SyntaxKind::L_PAREN) => SyntaxKind::METHOD_DECLARATION,
            (SyntaxKind::IDENT, SyntaxKind::L_BRACE) => SyntaxKind::PROPERTY_DECLARATION,
            _ => SyntaxKind::FIELD_DECLARATION,
        };
        self.start_node_at(checkpoint, kind);
        self.expect(SyntaxKind::IDENT);
        match kind {
            SyntaxKind::METHOD_DECLARATION => self.parse_method_rest(),
            SyntaxKind::PROPERTY_DECLARATION => self.parse_accessor_list(),
            _ => {
                if self.eat(SyntaxKind::EQ) {
                    self.parse_expression();
                }
                self.expect(SyntaxKind::SEMICOLON);
            }
        }
        self.finish_node();
    }

    fn parse_type_declaration_rest(&mut self, kind: SyntaxKind) {
        // keyword
        self.bump();
        self.expect(SyntaxKind::IDENT);
        if self.eat(SyntaxKind::COLON) {
            self.parse_type_ref();
            while self.eat(SyntaxKind::COMMA) {
                self.parse_type_ref();
            }
        }
        if kind == SyntaxKind::ENUM_DECLARATION {
            self.parse_enum_members();
        } else {
            self.parse_member_list();
        }
    }

    fn parse_enum_members(&mut self) {
        self.start_node(SyntaxKind::MEMBER_LIST);
        if self.expect(SyntaxKind::L_BRACE) {
            while self.at(SyntaxKind::IDENT) {
                self.start_node(SyntaxKind::ENUM_MEMBER);
                self.bump();
                if self.eat(SyntaxKind::EQ) {
                    self.parse_expression();
                }
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                self.error_bump("expected enum member");
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
    }

    /// Parameters and body of a method or constructor
    fn parse_method_rest(&mut self) {
        self.parse_parameter_list();
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::FAT_ARROW => {
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::SEMICOLON);
            }
            _ => {
                self.expect(SyntaxKind::SEMICOLON);
            }
        }
    }

    fn parse_parameter_list(&mut self) {
        self.start_node(SyntaxKind::PARAMETER_LIST);
        self.expect(SyntaxKind::L_PAREN);
        while self.at_type_start() {
            self.start_node(SyntaxKind::PARAMETER);
            self.parse_type_ref();
            self.expect(SyntaxKind::IDENT);
            if self.eat(SyntaxKind::EQ) {
                self.parse_expression();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    fn parse_accessor_list(&mut self) {
        self.start_node(SyntaxKind::ACCESSOR_LIST);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let start = self.pos;
            self.start_node(SyntaxKind::ACCESSOR);
            self.parse_modifiers();
            // `get` / `set` are contextual identifiers
            self.expect(SyntaxKind::IDENT);
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_block();
            } else if self.eat(SyntaxKind::FAT_ARROW) {
                self.parse_expression();
                self.expect(SyntaxKind::SEMICOLON);
            } else {
                self.expect(SyntaxKind::SEMICOLON);
            }
            self.finish_node();
            if self.pos == start {
                self.error_bump("expected accessor");
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn at_type_start(&self) -> bool {
        self.at(SyntaxKind::IDENT) || self.current_kind().is_predefined_type()
    }

    /// `int`, `Foo.Bar`, `List<int>`, `int[]`, `int?`
    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);
        if self.current_kind().is_predefined_type() {
            self.bump();
        } else {
            self.parse_qualified_name();
        }
        if self.at(SyntaxKind::LT) {
            self.bump();
            while self.at_type_start() {
                self.parse_type_ref();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::GT);
        }
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.bump();
            self.bump();
        }
        self.eat(SyntaxKind::QUESTION);
        self.finish_node();
    }

    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect(SyntaxKind::IDENT);
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let start = self.pos;
            self.parse_statement();
            if self.pos == start {
                self.error_bump(format!("unexpected {:?}", self.current_kind()));
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::IF_KW => self.parse_if(),
            SyntaxKind::WHILE_KW => self.parse_while(),
            SyntaxKind::FOR_KW => self.parse_for(),
            SyntaxKind::RETURN_KW => {
                self.start_node(SyntaxKind::RETURN_STATEMENT);
                self.bump();
                if !self.at(SyntaxKind::SEMICOLON) {
                    self.parse_expression();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW => {
                self.start_node(SyntaxKind::JUMP_STATEMENT);
                self.bump();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            _ if self.at_local_declaration() => {
                self.start_node(SyntaxKind::LOCAL_DECLARATION);
                self.parse_local_declaration_body();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::CLASS_KW
            | SyntaxKind::STRUCT_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::ENUM_KW
            | SyntaxKind::NAMESPACE_KW
            | SyntaxKind::USING_KW
            | SyntaxKind::ELSE_KW => {}
            _ => {
                self.start_node(SyntaxKind::EXPRESSION_STATEMENT);
                if !self.at(SyntaxKind::SEMICOLON) {
                    self.parse_expression();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
        }
    }

    fn at_local_declaration(&self) -> bool {
        match self.current_kind() {
            SyntaxKind::VAR_KW | SyntaxKind::INT_KW | SyntaxKind::STRING_KW | SyntaxKind::BOOL_KW => {
                true
            }
            SyntaxKind::IDENT => self.nth(1) == SyntaxKind::IDENT,
            _ => false,
        }
    }

    /// `Type name (= expr)?` without the semicolon
    fn parse_local_declaration_body(&mut self) {
        self.parse_type_ref();
        self.expect(SyntaxKind::IDENT);
        if self.eat(SyntaxKind::EQ) {
            self.parse_expression();
        }
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_STATEMENT);
        self.bump();
        self.parse_condition();
        self.parse_embedded_statement();
        if self.at(SyntaxKind::ELSE_KW) {
            self.start_node(SyntaxKind::ELSE_CLAUSE);
            self.bump();
            self.parse_embedded_statement();
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_while(&mut self) {
        self.start_node(SyntaxKind::WHILE_STATEMENT);
        self.bump();
        self.parse_condition();
        self.parse_embedded_statement();
        self.finish_node();
    }

    fn parse_for(&mut self) {
        self.start_node(SyntaxKind::FOR_STATEMENT);
        self.bump();
        if self.expect(SyntaxKind::L_PAREN) {
            if self.at_local_declaration() {
                self.start_node(SyntaxKind::LOCAL_DECLARATION);
                self.parse_local_declaration_body();
                self.finish_node();
            } else if !self.at(SyntaxKind::SEMICOLON) {
                self.parse_expression();
            }
            self.expect(SyntaxKind::SEMICOLON);
            if !self.at(SyntaxKind::SEMICOLON) {
                self.parse_expression();
            }
            self.expect(SyntaxKind::SEMICOLON);
            if !self.at(SyntaxKind::R_PAREN) {
                self.parse_expression();
            }
            self.expect(SyntaxKind::R_PAREN);
        }
        self.parse_embedded_statement();
        self.finish_node();
    }

    /// `( expr )`
    fn parse_condition(&mut self) {
        if self.expect(SyntaxKind::L_PAREN) {
            self.parse_expression();
            self.expect(SyntaxKind::R_PAREN);
        }
    }

    fn parse_embedded_statement(&mut self) {
        if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
            self.error("expected statement");
            return;
        }
        let start = self.pos;
        self.parse_statement();
        if self.pos == start {
            self.error("expected statement");
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// A flat, bracket-balanced run of tokens. Calls and indexers nest as
    /// argument lists, `new T { ... }` as an object creation.
    fn parse_expression(&mut self) {
        self.start_node(SyntaxKind::EXPRESSION);
        while !self.at_any(EXPRESSION_END) && !self.at_any(STATEMENT_START) {
            match self.current_kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => self.parse_argument_list(),
                SyntaxKind::NEW_KW => self.parse_object_creation(),
                SyntaxKind::FAT_ARROW => {
                    self.bump();
                    if self.at(SyntaxKind::L_BRACE) {
                        self.parse_block();
                    }
                }
                _ => self.bump(),
            }
        }
        self.finish_node();
    }

    fn parse_argument_list(&mut self) {
        let close = if self.at(SyntaxKind::L_PAREN) {
            SyntaxKind::R_PAREN
        } else {
            SyntaxKind::R_BRACKET
        };
        self.start_node(SyntaxKind::ARGUMENT_LIST);
        self.bump();
        while !self.at_eof() && !self.at(close) {
            let start = self.pos;
            self.parse_expression();
            if !self.eat(SyntaxKind::COMMA) && self.pos == start {
                break;
            }
        }
        self.expect(close);
        self.finish_node();
    }

    fn parse_object_creation(&mut self) {
        self.start_node(SyntaxKind::OBJECT_CREATION);
        self.bump();
        if self.at_type_start() {
            self.parse_type_ref();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_argument_list();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.start_node(SyntaxKind::INITIALIZER);
            self.bump();
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                let start = self.pos;
                self.parse_expression();
                if !self.eat(SyntaxKind::COMMA) && self.pos == start {
                    break;
                }
            }
            self.expect(SyntaxKind::R_BRACE);
            self.finish_node();
        }
        self.finish_node();
    }
}
