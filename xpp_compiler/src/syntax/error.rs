//! Parser error types
//!
//! [`SyntaxError`] covers grammar failures. [`ParseError`] is what the parser
//! returns: the first lexical, syntax or semantic failure, unchanged.

use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::semantic_analysis::SemanticError;
use crate::tokens::TokenKind;

pub type ParseResult<T> = Result<T, ParseError>;

/// Render the offending token for diagnostics
fn describe_found(kind: &TokenKind, lexeme: &str) -> String {
    if lexeme.is_empty() {
        kind.to_string()
    } else {
        format!("{} ('{}')", kind, lexeme)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Syntax error at line {line}: expected {expected}, found {}", describe_found(.found, .lexeme))]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        line: u32,
    },

    #[error("Syntax error at line {line}: {message}, found {}", describe_found(.found, .lexeme))]
    GrammarViolation {
        message: String,
        found: TokenKind,
        lexeme: String,
        line: u32,
    },

    #[error("Syntax error at line {line}: method declaration found where variable expected; declare all variables before methods (at '{name}')")]
    MethodBeforeVariables { name: String, line: u32 },
}

impl SyntaxError {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::GrammarViolation { line, .. }
            | Self::MethodBeforeVariables { line, .. } => *line,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::GrammarViolation { .. } => codes::syntax::GRAMMAR_VIOLATION,
            Self::MethodBeforeVariables { .. } => codes::syntax::DECLARATION_ORDER,
        }
    }
}

/// First failure met while parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            Self::Lexical(e) => e.line(),
            Self::Syntax(e) => e.line(),
            Self::Semantic(e) => e.line(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Lexical(e) => e.error_code(),
            Self::Syntax(e) => e.error_code(),
            Self::Semantic(e) => e.error_code(),
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Error type string for logging context
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Lexical(_) => "lexical",
            Self::Syntax(_) => "syntax",
            Self::Semantic(_) => "semantic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message_names_both_kinds() {
        let error = SyntaxError::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::Id,
            lexeme: "y".to_string(),
            line: 4,
        };
        assert_eq!(
            error.to_string(),
            "Syntax error at line 4: expected SEMICOLON, found ID ('y')"
        );
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_TOKEN);
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let lexical = LexerError::UnterminatedComment { line: 7 };
        let error = ParseError::from(lexical.clone());
        assert_eq!(error.to_string(), lexical.to_string());
        assert_eq!(error.line(), 7);
        assert_eq!(error.stage(), "lexical");
        assert!(error.requires_halt());
    }
}
