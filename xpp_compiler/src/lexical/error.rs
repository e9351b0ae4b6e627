use crate::logging::codes;

/// Fatal scanner failures, each carrying the line where scanning stopped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Lexical error at line {line}: invalid character {character:?}")]
    InvalidCharacter { character: char, line: u32 },

    #[error("Lexical error at line {line}: unterminated string literal")]
    UnterminatedString { line: u32 },

    #[error("Lexical error at line {line}: unterminated block comment")]
    UnterminatedComment { line: u32 },

    #[error("Lexical error at line {line}: invalid character literal")]
    InvalidCharLiteral { line: u32 },

    #[error("Lexical error at line {line}: invalid escape sequence '\\{escape}'")]
    InvalidEscape { escape: char, line: u32 },

    #[error("Lexical error at line {line}: non-printable character in literal")]
    NonPrintableCharacter { line: u32 },

    #[error("Lexical error at line {line}: invalid number '{text}'")]
    InvalidNumber { text: String, line: u32 },

    #[error("Lexical error at line {line}: incomplete operator '{operator}'")]
    IncompleteOperator { operator: char, line: u32 },
}

impl LexerError {
    pub fn line(&self) -> u32 {
        match self {
            LexerError::InvalidCharacter { line, .. }
            | LexerError::UnterminatedString { line }
            | LexerError::UnterminatedComment { line }
            | LexerError::InvalidCharLiteral { line }
            | LexerError::InvalidEscape { line, .. }
            | LexerError::NonPrintableCharacter { line }
            | LexerError::InvalidNumber { line, .. }
            | LexerError::IncompleteOperator { line, .. } => *line,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::UnterminatedComment { .. } => codes::lexical::UNTERMINATED_COMMENT,
            LexerError::InvalidCharLiteral { .. } => codes::lexical::INVALID_CHAR_LITERAL,
            LexerError::InvalidEscape { .. } => codes::lexical::INVALID_ESCAPE,
            LexerError::NonPrintableCharacter { .. } => codes::lexical::NON_PRINTABLE_CHARACTER,
            LexerError::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            LexerError::IncompleteOperator { .. } => codes::lexical::INCOMPLETE_OPERATOR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
