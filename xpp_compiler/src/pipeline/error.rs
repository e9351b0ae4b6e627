use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::syntax::ParseError;

/// Anything that stops a compilation
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    FileProcessing(#[from] FileProcessorError),

    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Usage error: {message}")]
    Usage { message: String },
}

impl PipelineError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::Lexical(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Usage { .. } => codes::system::USAGE_ERROR,
        }
    }

    /// Source line of a compilation error
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Lexical(e) => Some(e.line()),
            Self::Parse(e) => Some(e.line()),
            Self::FileProcessing(_) | Self::Usage { .. } => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error() {
        let error = PipelineError::usage("dialect minic supports only the lex stage");
        assert_eq!(error.error_code(), codes::system::USAGE_ERROR);
        assert_eq!(error.line(), None);
        assert_eq!(
            error.to_string(),
            "Usage error: dialect minic supports only the lex stage"
        );
    }

    #[test]
    fn test_wrapped_errors_keep_their_message_and_line() {
        let lexical = LexerError::UnterminatedComment { line: 4 };
        let message = lexical.to_string();
        let error = PipelineError::from(lexical);

        assert_eq!(error.to_string(), message);
        assert_eq!(error.line(), Some(4));
        assert_eq!(error.error_code(), codes::lexical::UNTERMINATED_COMMENT);
    }
}
