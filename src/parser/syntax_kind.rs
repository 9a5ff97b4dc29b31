//! Syntax kinds for the sample brace language
//!
//! This enum defines all possible node, token and trivia kinds. Kinds are
//! grouped in contiguous ranges so category checks are range comparisons.

use crate::syntax::RawSyntaxKind;

/// All syntax kinds (trivia, tokens and nodes) of the sample language.
///
/// Trivia are attached to tokens. Tokens are leaf elements. Nodes are
/// composite (declarations, statements, directive and doc-comment structure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,       // // ...
    BLOCK_COMMENT,      // /* ... */
    DOC_COMMENT,        // /// ... (consecutive lines merged, structured)
    DIRECTIVE,          // #region / #endregion / #... (structured)

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    IDENT,
    INT_NUMBER,
    STRING,
    CHAR,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACKET,          // [
    R_BRACKET,          // ]
    SEMICOLON,          // ;
    COMMA,              // ,
    DOT,                // .
    COLON,              // :
    QUESTION,           // ?

    // =========================================================================
    // OPERATORS
    // =========================================================================
    EQ,                 // =
    EQ_EQ,              // ==
    BANG,               // !
    BANG_EQ,            // !=
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    AMP_AMP,            // &&
    PIPE_PIPE,          // ||
    PLUS_EQ,            // +=
    MINUS_EQ,           // -=
    PLUS_PLUS,          // ++
    MINUS_MINUS,        // --
    FAT_ARROW,          // =>

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ABSTRACT_KW,
    BOOL_KW,
    BREAK_KW,
    CLASS_KW,
    CONTINUE_KW,
    ELSE_KW,
    ENUM_KW,
    FALSE_KW,
    FOR_KW,
    IF_KW,
    INT_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OVERRIDE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    RETURN_KW,
    STATIC_KW,
    STRING_KW,
    STRUCT_KW,
    THIS_KW,
    TRUE_KW,
    USING_KW,
    VAR_KW,
    VIRTUAL_KW,
    VOID_KW,
    WHILE_KW,

    // =========================================================================
    // DIRECTIVE TOKENS (inside DIRECTIVE trivia structure)
    // =========================================================================
    HASH,
    REGION_KW,
    ENDREGION_KW,
    DIRECTIVE_NAME,
    PREPROCESSING_MESSAGE,

    // =========================================================================
    // DOC COMMENT TOKENS (inside DOC_COMMENT trivia structure)
    // =========================================================================
    DOC_EXTERIOR,       // ///
    XML_LT,             // <
    XML_LT_SLASH,       // </
    XML_GT,             // >
    XML_SLASH_GT,       // />
    XML_NAME,
    XML_EQ,
    XML_STRING,
    XML_TEXT_LITERAL,

    ERROR_TOKEN,
    EOF,

    // =========================================================================
    // NODES
    // =========================================================================
    COMPILATION_UNIT,
    USING_DIRECTIVE,
    NAMESPACE_DECLARATION,
    CLASS_DECLARATION,
    STRUCT_DECLARATION,
    INTERFACE_DECLARATION,
    ENUM_DECLARATION,
    ENUM_MEMBER,
    METHOD_DECLARATION,
    PROPERTY_DECLARATION,
    FIELD_DECLARATION,
    ACCESSOR_LIST,
    ACCESSOR,
    MODIFIER_LIST,
    QUALIFIED_NAME,
    TYPE_REF,
    PARAMETER_LIST,
    PARAMETER,
    MEMBER_LIST,        // { members } of a type or namespace
    BLOCK,
    IF_STATEMENT,
    ELSE_CLAUSE,
    WHILE_STATEMENT,
    FOR_STATEMENT,
    RETURN_STATEMENT,
    JUMP_STATEMENT,
    LOCAL_DECLARATION,
    EXPRESSION_STATEMENT,
    EXPRESSION,
    ARGUMENT_LIST,
    OBJECT_CREATION,
    INITIALIZER,        // { ... } after `new T`
    ERROR,

    // =========================================================================
    // STRUCTURED TRIVIA NODES
    // =========================================================================
    REGION_DIRECTIVE,
    END_REGION_DIRECTIVE,
    OTHER_DIRECTIVE,
    DOC_COMMENT_ROOT,
    XML_ELEMENT,
    XML_EMPTY_ELEMENT,
    XML_START_TAG,
    XML_END_TAG,
    XML_ATTRIBUTE,
    XML_TEXT,

    // Sentinel - must be last
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia kind
    pub fn is_trivia(self) -> bool {
        (self as u16) <= (Self::DIRECTIVE as u16)
    }

    /// Check if this is a comment trivia
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DOC_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::QUESTION as u16)
    }

    /// Check if this is an operator token
    pub fn is_operator(self) -> bool {
        (self as u16) >= (Self::EQ as u16) && (self as u16) <= (Self::FAT_ARROW as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER | Self::STRING | Self::CHAR | Self::TRUE_KW | Self::FALSE_KW | Self::NULL_KW
        )
    }

    /// Check if this is a predefined type keyword
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            Self::BOOL_KW | Self::INT_KW | Self::STRING_KW | Self::VOID_KW | Self::VAR_KW
        )
    }

    /// Check if this is a declaration modifier
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::ABSTRACT_KW
                | Self::INTERNAL_KW
                | Self::OVERRIDE_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::PUBLIC_KW
                | Self::READONLY_KW
                | Self::STATIC_KW
                | Self::VIRTUAL_KW
        )
    }

    /// Type declarations (class, struct, interface, enum)
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::CLASS_DECLARATION
                | Self::STRUCT_DECLARATION
                | Self::INTERFACE_DECLARATION
                | Self::ENUM_DECLARATION
        )
    }

    /// Member declarations, type declarations included (a nested type is a member)
    pub fn is_member_declaration(self) -> bool {
        self.is_type_declaration()
            || matches!(
                self,
                Self::METHOD_DECLARATION
                    | Self::PROPERTY_DECLARATION
                    | Self::FIELD_DECLARATION
                    | Self::ENUM_MEMBER
            )
    }

    /// Statements
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::BLOCK
                | Self::IF_STATEMENT
                | Self::WHILE_STATEMENT
                | Self::FOR_STATEMENT
                | Self::RETURN_STATEMENT
                | Self::JUMP_STATEMENT
                | Self::LOCAL_DECLARATION
                | Self::EXPRESSION_STATEMENT
        )
    }

    /// Directive structure nodes
    pub fn is_directive(self) -> bool {
        matches!(
            self,
            Self::REGION_DIRECTIVE | Self::END_REGION_DIRECTIVE | Self::OTHER_DIRECTIVE
        )
    }

    /// Doc comment structure nodes and tokens
    pub fn is_doc_comment_part(self) -> bool {
        (self as u16) >= (Self::DOC_EXTERIOR as u16)
            && (self as u16) <= (Self::XML_TEXT_LITERAL as u16)
            || (self as u16) >= (Self::DOC_COMMENT_ROOT as u16)
                && (self as u16) <= (Self::XML_TEXT as u16)
    }

    /// Convert a raw kind back. Returns `None` for kinds of other languages.
    pub fn from_raw(raw: RawSyntaxKind) -> Option<Self> {
        if raw.0 < SyntaxKind::__LAST as u16 {
            // SAFETY: SyntaxKind is repr(u16) with contiguous discriminants below __LAST
            Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) })
        } else {
            None
        }
    }

    /// Keyword lookup for identifiers
    pub fn from_keyword(ident: &str) -> Option<Self> {
        let kw = match ident {
            "abstract" => Self::ABSTRACT_KW,
            "bool" => Self::BOOL_KW,
            "break" => Self::BREAK_KW,
            "class" => Self::CLASS_KW,
            "continue" => Self::CONTINUE_KW,
            "else" => Self::ELSE_KW,
            "enum" => Self::ENUM_KW,
            "false" => Self::FALSE_KW,
            "for" => Self::FOR_KW,
            "if" => Self::IF_KW,
            "int" => Self::INT_KW,
            "interface" => Self::INTERFACE_KW,
            "internal" => Self::INTERNAL_KW,
            "namespace" => Self::NAMESPACE_KW,
            "new" => Self::NEW_KW,
            "null" => Self::NULL_KW,
            "override" => Self::OVERRIDE_KW,
            "private" => Self::PRIVATE_KW,
            "protected" => Self::PROTECTED_KW,
            "public" => Self::PUBLIC_KW,
            "readonly" => Self::READONLY_KW,
            "return" => Self::RETURN_KW,
            "static" => Self::STATIC_KW,
            "string" => Self::STRING_KW,
            "struct" => Self::STRUCT_KW,
            "this" => Self::THIS_KW,
            "true" => Self::TRUE_KW,
            "using" => Self::USING_KW,
            "var" => Self::VAR_KW,
            "virtual" => Self::VIRTUAL_KW,
            "void" => Self::VOID_KW,
            "while" => Self::WHILE_KW,
            _ => return None,
        };
        Some(kw)
    }
}

impl From<SyntaxKind> for RawSyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl PartialEq<SyntaxKind> for RawSyntaxKind {
    fn eq(&self, other: &SyntaxKind) -> bool {
        self.0 == *other as u16
    }
}
