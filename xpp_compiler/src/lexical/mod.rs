//! Lexical analysis for both grammar dialects
//!
//! [`Scanner`] is a demand-driven finite-state tokenizer: the parser pulls one
//! token at a time. Reserved words are resolved through the [`ReservedWords`]
//! seam, either by a [`Dialect`]'s fixed table or by the symbol table.

pub mod dialect;
pub mod error;
pub mod scanner;

pub use dialect::{xpp_keyword_kind, Dialect, ReservedWords};
pub use error::LexerError;
pub use scanner::{LexicalMetrics, Scanner};

use crate::logging::codes;
use crate::tokens::Token;
use crate::log_success;

/// Tokenize a whole source buffer, END_OF_FILE included
pub fn tokenize(source: impl Into<Vec<u8>>, dialect: Dialect) -> Result<Vec<Token>, LexerError> {
    tokenize_with_metrics(source, dialect).map(|(tokens, _)| tokens)
}

/// [`tokenize`], also handing back the scanner's counts
pub fn tokenize_with_metrics(
    source: impl Into<Vec<u8>>,
    dialect: Dialect,
) -> Result<(Vec<Token>, LexicalMetrics), LexerError> {
    let mut scanner = Scanner::new(source, dialect);
    let tokens = scanner.tokenize()?;
    let metrics = scanner.metrics().clone();

    log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
        "dialect" => dialect,
        "tokens" => metrics.total_tokens,
        "identifiers" => metrics.identifier_tokens,
        "keywords" => metrics.keyword_tokens,
        "literals" => metrics.literal_tokens,
        "comments" => metrics.comments_skipped,
        "lines" => metrics.lines
    );

    Ok((tokens, metrics))
}
