//! Token-set variants and reserved-word resolution

use crate::config::constants::compile_time::lexical::{MINIC_RESERVED_WORDS, XPP_RESERVED_WORDS};
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolves an identifier-shaped lexeme to a reserved-word kind
///
/// The scanner consults one of these when an identifier run ends. The static
/// dialect tables and the symbol table's root scope both implement it.
pub trait ReservedWords {
    fn reserved_kind(&self, lexeme: &str) -> Option<TokenKind>;
}

/// Grammar variant the scanner tokenizes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// The class-based grammar accepted by the parser
    Xpp,
    /// The C-like grammar, lexer stage only
    MiniC,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Xpp => "xpp",
            Dialect::MiniC => "minic",
        }
    }

    pub fn reserved_words(&self) -> &'static [&'static str] {
        match self {
            Dialect::Xpp => &XPP_RESERVED_WORDS,
            Dialect::MiniC => &MINIC_RESERVED_WORDS,
        }
    }

    /// Whether a parser exists for this dialect
    pub fn supports_parsing(&self) -> bool {
        matches!(self, Dialect::Xpp)
    }

    /// Identifiers may start with `_` only in the class grammar
    pub(crate) fn allows_leading_underscore(&self) -> bool {
        matches!(self, Dialect::Xpp)
    }

    pub(crate) fn integer_kind(&self) -> TokenKind {
        match self {
            Dialect::Xpp => TokenKind::IntegerLiteral,
            Dialect::MiniC => TokenKind::IntegerConstant,
        }
    }

    pub(crate) fn string_kind(&self) -> TokenKind {
        match self {
            Dialect::Xpp => TokenKind::StringLiteral,
            Dialect::MiniC => TokenKind::StringConstant,
        }
    }
}

/// Dedicated kind of an Xpp keyword
pub fn xpp_keyword_kind(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "class" => TokenKind::Class,
        "extends" => TokenKind::Extends,
        "int" => TokenKind::Int,
        "string" => TokenKind::String,
        "break" => TokenKind::Break,
        "print" => TokenKind::Print,
        "read" => TokenKind::Read,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "new" => TokenKind::New,
        "constructor" => TokenKind::Constructor,
        _ => return None,
    };
    Some(kind)
}

impl ReservedWords for Dialect {
    fn reserved_kind(&self, lexeme: &str) -> Option<TokenKind> {
        match self {
            Dialect::Xpp => xpp_keyword_kind(lexeme),
            // MiniC keywords all share one kind
            Dialect::MiniC => MINIC_RESERVED_WORDS
                .contains(&lexeme)
                .then_some(TokenKind::ReservedWord),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xpp" | "x++" => Ok(Dialect::Xpp),
            "minic" | "c" => Ok(Dialect::MiniC),
            other => Err(format!(
                "unknown dialect '{}' (expected 'xpp' or 'minic')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_xpp_reserved_word_has_a_kind() {
        for word in XPP_RESERVED_WORDS {
            let kind = Dialect::Xpp.reserved_kind(word);
            assert!(kind.is_some_and(|k| k.is_keyword()), "{}", word);
        }
        assert_eq!(Dialect::Xpp.reserved_kind("classes"), None);
        assert_eq!(Dialect::Xpp.reserved_kind("void"), None);
    }

    #[test]
    fn test_minic_reserved_words_collapse_to_one_kind() {
        assert_eq!(
            Dialect::MiniC.reserved_kind("while"),
            Some(TokenKind::ReservedWord)
        );
        assert_eq!(
            Dialect::MiniC.reserved_kind("char"),
            Some(TokenKind::ReservedWord)
        );
        assert_eq!(Dialect::MiniC.reserved_kind("class"), None);
    }

    #[test]
    fn test_parse_dialect_names() {
        assert_eq!("xpp".parse::<Dialect>(), Ok(Dialect::Xpp));
        assert_eq!("MiniC".parse::<Dialect>(), Ok(Dialect::MiniC));
        assert!("pascal".parse::<Dialect>().is_err());
        assert!(Dialect::Xpp.supports_parsing());
        assert!(!Dialect::MiniC.supports_parsing());
    }
}
