//! Token kinds and the token value produced by the scanner
//!
//! One closed enumeration covers both dialects. Kinds that only one dialect
//! produces are grouped below; the parser never sees MiniC-only kinds.

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every lexical category the scanner can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // === SHARED ===
    Id,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqualThan,
    LessOrEqualThan,
    PlusOperator,
    MinusOperator,
    MultiplyOperator,
    DivideOperator,
    LeftBracket,
    RightBracket,
    LeftCurlyBrace,
    RightCurlyBrace,
    LeftSquareBracket,
    RightSquareBracket,
    Semicolon,
    Comma,
    Assignment,
    EndOfFile,

    // === MINIC ONLY ===
    IntegerConstant,
    CharConstant,
    StringConstant,
    ReservedWord,
    AndOperator,
    OrOperator,
    NotOperator,

    // === XPP ONLY ===
    IntegerLiteral,
    StringLiteral,
    ModuloOperator,
    Dot,
    Class,
    Extends,
    Int,
    String,
    Break,
    Print,
    Read,
    Return,
    Super,
    If,
    Else,
    For,
    New,
    Constructor,
}

impl TokenKind {
    /// Name used in traces and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Id => "ID",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::GreaterOrEqualThan => "GREATER_OR_EQUAL_THAN",
            TokenKind::LessOrEqualThan => "LESS_OR_EQUAL_THAN",
            TokenKind::PlusOperator => "PLUS_OPERATOR",
            TokenKind::MinusOperator => "MINUS_OPERATOR",
            TokenKind::MultiplyOperator => "MULTIPLY_OPERATOR",
            TokenKind::DivideOperator => "DIVIDE_OPERATOR",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::LeftCurlyBrace => "LEFT_CURLY_BRACE",
            TokenKind::RightCurlyBrace => "RIGHT_CURLY_BRACE",
            TokenKind::LeftSquareBracket => "LEFT_SQUARE_BRACKET",
            TokenKind::RightSquareBracket => "RIGHT_SQUARE_BRACKET",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Assignment => "ASSIGNMENT",
            TokenKind::EndOfFile => "END_OF_FILE",
            TokenKind::IntegerConstant => "INTEGER_CONSTANT",
            TokenKind::CharConstant => "CHAR_CONSTANT",
            TokenKind::StringConstant => "STRING_CONSTANT",
            TokenKind::ReservedWord => "RESERVED_WORD",
            TokenKind::AndOperator => "AND_OPERATOR",
            TokenKind::OrOperator => "OR_OPERATOR",
            TokenKind::NotOperator => "NOT_OPERATOR",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::ModuloOperator => "MODULO_OPERATOR",
            TokenKind::Dot => "DOT",
            TokenKind::Class => "CLASS",
            TokenKind::Extends => "EXTENDS",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Break => "BREAK",
            TokenKind::Print => "PRINT",
            TokenKind::Read => "READ",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::New => "NEW",
            TokenKind::Constructor => "CONSTRUCTOR",
        }
    }

    /// Kinds whose lexeme carries the source text
    pub fn carries_lexeme(&self) -> bool {
        matches!(
            self,
            TokenKind::Id
                | TokenKind::IntegerConstant
                | TokenKind::CharConstant
                | TokenKind::StringConstant
                | TokenKind::ReservedWord
                | TokenKind::IntegerLiteral
                | TokenKind::StringLiteral
        ) || self.is_keyword()
    }

    /// Xpp keywords with a dedicated kind
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Extends
                | TokenKind::Int
                | TokenKind::String
                | TokenKind::Break
                | TokenKind::Print
                | TokenKind::Read
                | TokenKind::Return
                | TokenKind::Super
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::New
                | TokenKind::Constructor
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerConstant
                | TokenKind::CharConstant
                | TokenKind::StringConstant
                | TokenKind::IntegerLiteral
                | TokenKind::StringLiteral
        )
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::GreaterThan
                | TokenKind::LessThan
                | TokenKind::GreaterOrEqualThan
                | TokenKind::LessOrEqualThan
        )
    }

    pub fn is_operator(&self) -> bool {
        self.is_relational()
            || matches!(
                self,
                TokenKind::PlusOperator
                    | TokenKind::MinusOperator
                    | TokenKind::MultiplyOperator
                    | TokenKind::DivideOperator
                    | TokenKind::ModuloOperator
                    | TokenKind::AndOperator
                    | TokenKind::OrOperator
                    | TokenKind::NotOperator
                    | TokenKind::Assignment
            )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical unit with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,

    /// Source text for identifiers, literals and keywords; empty otherwise
    pub lexeme: String,

    /// Secondary classification; when present it names the token in traces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<TokenKind>,

    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            attribute: None,
            span,
        }
    }

    pub fn with_attribute(mut self, attribute: TokenKind) -> Self {
        self.attribute = Some(attribute);
        self
    }

    /// True when either the kind or the attribute is `kind`
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind || self.attribute == Some(kind)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    pub fn trace_name(&self) -> &'static str {
        self.attribute.unwrap_or(self.kind).name()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}(\"{}\")", self.kind, self.lexeme)
        }
    }
}

/// Render a token sequence as the space-separated lexer trace
pub fn format_trace(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::trace_name)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::default())
    }

    #[test]
    fn test_names_are_screaming_snake_case() {
        assert_eq!(TokenKind::GreaterOrEqualThan.name(), "GREATER_OR_EQUAL_THAN");
        assert_eq!(TokenKind::EndOfFile.to_string(), "END_OF_FILE");

        let json = serde_json::to_string(&TokenKind::LeftSquareBracket).unwrap();
        assert_eq!(json, "\"LEFT_SQUARE_BRACKET\"");
    }

    #[test]
    fn test_attribute_overrides_trace_name_and_matching() {
        let plain = token(TokenKind::Id, "total");
        assert_eq!(plain.trace_name(), "ID");
        assert!(!plain.is(TokenKind::IntegerLiteral));

        let tagged = token(TokenKind::Id, "total").with_attribute(TokenKind::IntegerLiteral);
        assert_eq!(tagged.trace_name(), "INTEGER_LITERAL");
        assert!(tagged.is(TokenKind::Id));
        assert!(tagged.is(TokenKind::IntegerLiteral));
    }

    #[test]
    fn test_format_trace_joins_with_spaces() {
        let tokens = vec![
            token(TokenKind::Id, "x"),
            token(TokenKind::Assignment, ""),
            token(TokenKind::IntegerConstant, "1"),
            token(TokenKind::Semicolon, ""),
            token(TokenKind::EndOfFile, ""),
        ];
        assert_eq!(
            format_trace(&tokens),
            "ID ASSIGNMENT INTEGER_CONSTANT SEMICOLON END_OF_FILE"
        );
    }

    #[test]
    fn test_token_display_includes_lexeme_when_present() {
        assert_eq!(token(TokenKind::Id, "y3").to_string(), "ID(\"y3\")");
        assert_eq!(token(TokenKind::Comma, "").to_string(), "COMMA");
    }

    #[test]
    fn test_kind_classification() {
        assert!(TokenKind::Constructor.is_keyword());
        assert!(TokenKind::Constructor.carries_lexeme());
        assert!(!TokenKind::Semicolon.carries_lexeme());
        assert!(TokenKind::LessOrEqualThan.is_relational());
        assert!(TokenKind::ModuloOperator.is_operator());
        assert!(TokenKind::CharConstant.is_literal());
    }
}
