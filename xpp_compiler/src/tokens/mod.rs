//! Token system shared by the scanner and the parser
//!
//! - **[`TokenKind`]** - closed enumeration of every lexical category, for both dialects
//! - **[`Token`]** - kind, lexeme, optional attribute and source span
//! - **[`format_trace`]** - the lexer-stage trace rendering

pub mod token;

pub use token::{format_trace, Token, TokenKind};
