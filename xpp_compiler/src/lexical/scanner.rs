//! Finite-state scanner producing one token per call
//!
//! The scanner owns the source bytes and a cursor. Each call to
//! [`Scanner::next_token`] runs the state machine from `Start` until exactly
//! one token is complete, skipping whitespace and comments on the way.
//! Lookahead is done by peeking, so the cursor only ever moves forward.

use super::dialect::{Dialect, ReservedWords};
use super::error::LexerError;
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error};
use serde::Serialize;

/// Token and comment counts gathered while scanning
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub identifier_tokens: usize,
    pub keyword_tokens: usize,
    pub literal_tokens: usize,
    pub operator_tokens: usize,
    pub punctuation_tokens: usize,
    pub comments_skipped: usize,
    pub lines: u32,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token.kind {
            TokenKind::Id => self.identifier_tokens += 1,
            TokenKind::ReservedWord => self.keyword_tokens += 1,
            kind if kind.is_keyword() => self.keyword_tokens += 1,
            kind if kind.is_literal() => self.literal_tokens += 1,
            kind if kind.is_operator() => self.operator_tokens += 1,
            TokenKind::EndOfFile => {}
            _ => self.punctuation_tokens += 1,
        }
    }
}

/// Scanner states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Identifier,
    Integer,
    Less,
    Greater,
    Assign,
    Bang,
    Slash,
    LineComment,
    BlockComment,
    BlockCommentStar,
    Ampersand,
    Pipe,
    StringLiteral,
    StringEscape,
}

pub struct Scanner {
    input: Vec<u8>,
    pos: Position,
    dialect: Dialect,
    metrics: LexicalMetrics,
}

impl Scanner {
    pub fn new(source: impl Into<Vec<u8>>, dialect: Dialect) -> Self {
        Self {
            input: source.into(),
            pos: Position::start(),
            dialect,
            metrics: LexicalMetrics::default(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Line the cursor is currently on
    pub fn line(&self) -> u32 {
        self.pos.line
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Next token, with keywords resolved by the dialect's fixed table
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        let dialect = self.dialect;
        self.next_token_with(&dialect)
    }

    /// Next token, with keywords resolved by `reserved`
    pub fn next_token_with<R>(&mut self, reserved: &R) -> Result<Token, LexerError>
    where
        R: ReservedWords + ?Sized,
    {
        match self.scan(reserved) {
            Ok(token) => {
                self.metrics.record_token(&token);
                if token.is_eof() {
                    self.metrics.lines = self.pos.line;
                }
                Ok(token)
            }
            Err(error) => {
                log_error!(error.error_code(), "Lexical analysis failed",
                    span = Span::empty_at(self.pos),
                    "line" => error.line(),
                    "dialect" => self.dialect,
                    "detail" => &error
                );
                Err(error)
            }
        }
    }

    /// Scan the whole input, END_OF_FILE included
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                log_debug!("Scanner reached end of input",
                    "tokens" => tokens.len(),
                    "lines" => self.metrics.lines,
                    "comments" => self.metrics.comments_skipped
                );
                return Ok(tokens);
            }
        }
    }

    fn scan<R>(&mut self, reserved: &R) -> Result<Token, LexerError>
    where
        R: ReservedWords + ?Sized,
    {
        let mut state = State::Start;
        let mut start = self.pos;
        let mut lexeme = String::new();

        loop {
            let current = self.peek();

            match state {
                State::Start => {
                    start = self.pos;
                    let Some(byte) = current else {
                        return Ok(Token::new(TokenKind::EndOfFile, "", Span::empty_at(self.pos)));
                    };

                    match byte {
                        b if is_whitespace(b) => self.bump(),
                        b if self.is_identifier_start(b) => {
                            self.bump();
                            lexeme.push(char::from(b));
                            state = State::Identifier;
                        }
                        b if b.is_ascii_digit() => {
                            self.bump();
                            lexeme.push(char::from(b));
                            state = State::Integer;
                        }
                        b'<' => self.shift(&mut state, State::Less),
                        b'>' => self.shift(&mut state, State::Greater),
                        b'=' => self.shift(&mut state, State::Assign),
                        b'!' => self.shift(&mut state, State::Bang),
                        b'/' => self.shift(&mut state, State::Slash),
                        b'"' => self.shift(&mut state, State::StringLiteral),
                        b'&' if self.dialect == Dialect::MiniC => {
                            self.shift(&mut state, State::Ampersand)
                        }
                        b'|' if self.dialect == Dialect::MiniC => {
                            self.shift(&mut state, State::Pipe)
                        }
                        b'\'' if self.dialect == Dialect::MiniC => {
                            self.bump();
                            return self.char_literal(start);
                        }
                        b'%' if self.dialect == Dialect::Xpp => {
                            return Ok(self.single(TokenKind::ModuloOperator, start))
                        }
                        b'.' if self.dialect == Dialect::Xpp => {
                            return Ok(self.single(TokenKind::Dot, start))
                        }
                        b'+' => return Ok(self.single(TokenKind::PlusOperator, start)),
                        b'-' => return Ok(self.single(TokenKind::MinusOperator, start)),
                        b'*' => return Ok(self.single(TokenKind::MultiplyOperator, start)),
                        b'(' => return Ok(self.single(TokenKind::LeftBracket, start)),
                        b')' => return Ok(self.single(TokenKind::RightBracket, start)),
                        b'{' => return Ok(self.single(TokenKind::LeftCurlyBrace, start)),
                        b'}' => return Ok(self.single(TokenKind::RightCurlyBrace, start)),
                        b'[' => return Ok(self.single(TokenKind::LeftSquareBracket, start)),
                        b']' => return Ok(self.single(TokenKind::RightSquareBracket, start)),
                        b';' => return Ok(self.single(TokenKind::Semicolon, start)),
                        b',' => return Ok(self.single(TokenKind::Comma, start)),
                        other => {
                            return Err(LexerError::InvalidCharacter {
                                character: char::from(other),
                                line: self.line(),
                            })
                        }
                    }
                }

                State::Identifier => match current {
                    Some(b) if b.is_ascii_alphanumeric() || b == b'_' => {
                        self.bump();
                        lexeme.push(char::from(b));
                    }
                    _ => {
                        let kind = reserved.reserved_kind(&lexeme).unwrap_or(TokenKind::Id);
                        return Ok(self.token(kind, lexeme, start));
                    }
                },

                State::Integer => match current {
                    Some(b) if b.is_ascii_digit() => {
                        self.bump();
                        lexeme.push(char::from(b));
                    }
                    Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                        while let Some(b) = self.peek() {
                            if !(b.is_ascii_alphanumeric() || b == b'_') {
                                break;
                            }
                            self.bump();
                            lexeme.push(char::from(b));
                        }
                        return Err(LexerError::InvalidNumber {
                            text: lexeme,
                            line: self.line(),
                        });
                    }
                    _ => {
                        let kind = self.dialect.integer_kind();
                        return Ok(self.token(kind, lexeme, start));
                    }
                },

                State::Less => {
                    return Ok(self.with_equals(TokenKind::LessOrEqualThan, TokenKind::LessThan, start))
                }

                State::Greater => {
                    return Ok(self.with_equals(
                        TokenKind::GreaterOrEqualThan,
                        TokenKind::GreaterThan,
                        start,
                    ))
                }

                State::Assign => {
                    return Ok(self.with_equals(TokenKind::Equal, TokenKind::Assignment, start))
                }

                State::Bang => match current {
                    Some(b'=') => return Ok(self.single(TokenKind::NotEqual, start)),
                    _ if self.dialect == Dialect::MiniC => {
                        return Ok(self.token(TokenKind::NotOperator, String::new(), start))
                    }
                    _ => {
                        return Err(LexerError::IncompleteOperator {
                            operator: '!',
                            line: self.line(),
                        })
                    }
                },

                State::Slash => match current {
                    Some(b'/') => self.shift(&mut state, State::LineComment),
                    Some(b'*') => self.shift(&mut state, State::BlockComment),
                    _ => return Ok(self.token(TokenKind::DivideOperator, String::new(), start)),
                },

                State::LineComment => match current {
                    None => {
                        self.metrics.comments_skipped += 1;
                        state = State::Start;
                    }
                    Some(b'\n') => {
                        self.bump();
                        self.metrics.comments_skipped += 1;
                        state = State::Start;
                    }
                    Some(_) => self.bump(),
                },

                State::BlockComment => match current {
                    None => return Err(LexerError::UnterminatedComment { line: self.line() }),
                    Some(b'*') => self.shift(&mut state, State::BlockCommentStar),
                    Some(_) => self.bump(),
                },

                State::BlockCommentStar => match current {
                    None => return Err(LexerError::UnterminatedComment { line: self.line() }),
                    Some(b'/') => {
                        self.bump();
                        self.metrics.comments_skipped += 1;
                        state = State::Start;
                    }
                    Some(b'*') => self.bump(),
                    Some(_) => self.shift(&mut state, State::BlockComment),
                },

                State::Ampersand => match current {
                    Some(b'&') => return Ok(self.single(TokenKind::AndOperator, start)),
                    _ => {
                        return Err(LexerError::IncompleteOperator {
                            operator: '&',
                            line: self.line(),
                        })
                    }
                },

                State::Pipe => match current {
                    Some(b'|') => return Ok(self.single(TokenKind::OrOperator, start)),
                    _ => {
                        return Err(LexerError::IncompleteOperator {
                            operator: '|',
                            line: self.line(),
                        })
                    }
                },

                State::StringLiteral => match current {
                    None | Some(b'\n') => {
                        return Err(LexerError::UnterminatedString { line: self.line() })
                    }
                    Some(b'"') => {
                        self.bump();
                        let kind = self.dialect.string_kind();
                        return Ok(self.token(kind, lexeme, start));
                    }
                    Some(b'\\') if self.dialect == Dialect::MiniC => {
                        self.shift(&mut state, State::StringEscape)
                    }
                    Some(b) if is_printable(b) => {
                        self.bump();
                        lexeme.push(char::from(b));
                    }
                    Some(_) => {
                        return Err(LexerError::NonPrintableCharacter { line: self.line() })
                    }
                },

                State::StringEscape => match current {
                    None | Some(b'\n') => {
                        return Err(LexerError::UnterminatedString { line: self.line() })
                    }
                    Some(b @ (b'\\' | b'"')) => {
                        self.bump();
                        lexeme.push(char::from(b));
                        state = State::StringLiteral;
                    }
                    Some(b) => {
                        return Err(LexerError::InvalidEscape {
                            escape: char::from(b),
                            line: self.line(),
                        })
                    }
                },
            }
        }
    }

    /// Body of a character literal after its opening quote
    fn char_literal(&mut self, start: Position) -> Result<Token, LexerError> {
        let mut lexeme = String::new();
        match self.peek() {
            Some(b'\\') => {
                self.bump();
                match self.peek() {
                    Some(b @ (b'n' | b'0')) => {
                        self.bump();
                        lexeme.push('\\');
                        lexeme.push(char::from(b));
                    }
                    _ => return Err(self.invalid_char_literal()),
                }
            }
            Some(b) if is_printable(b) && b != b'\'' => {
                self.bump();
                lexeme.push(char::from(b));
            }
            _ => return Err(self.invalid_char_literal()),
        }

        match self.peek() {
            Some(b'\'') => {
                self.bump();
                Ok(self.token(TokenKind::CharConstant, lexeme, start))
            }
            _ => Err(self.invalid_char_literal()),
        }
    }

    fn invalid_char_literal(&self) -> LexerError {
        LexerError::InvalidCharLiteral { line: self.line() }
    }

    fn is_identifier_start(&self, byte: u8) -> bool {
        byte.is_ascii_alphabetic() || (byte == b'_' && self.dialect.allows_leading_underscore())
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos.offset).copied()
    }

    fn bump(&mut self) {
        if let Some(byte) = self.peek() {
            self.pos = self.pos.advance(byte);
        }
    }

    fn shift(&mut self, state: &mut State, next: State) {
        self.bump();
        *state = next;
    }

    /// Consume one more byte and emit a lexeme-less token
    fn single(&mut self, kind: TokenKind, start: Position) -> Token {
        self.bump();
        self.token(kind, String::new(), start)
    }

    /// `long` if the next byte is `=`, otherwise `short` without consuming
    fn with_equals(&mut self, long: TokenKind, short: TokenKind, start: Position) -> Token {
        if self.peek() == Some(b'=') {
            self.single(long, start)
        } else {
            self.token(short, String::new(), start)
        }
    }

    fn token(&self, kind: TokenKind, lexeme: String, start: Position) -> Token {
        Token::new(kind, lexeme, Span::new(start, self.pos))
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(source: &str, dialect: Dialect) -> Vec<TokenKind> {
        Scanner::new(source, dialect)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn error(source: &str, dialect: Dialect) -> LexerError {
        Scanner::new(source, dialect).tokenize().unwrap_err()
    }

    #[test]
    fn test_minic_assignment_sequence() {
        let tokens = Scanner::new("x = 12 + y3;", Dialect::MiniC)
            .tokenize()
            .unwrap();

        let summary: Vec<(TokenKind, &str)> = tokens
            .iter()
            .map(|t| (t.kind, t.lexeme.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Id, "x"),
                (TokenKind::Assignment, ""),
                (TokenKind::IntegerConstant, "12"),
                (TokenKind::PlusOperator, ""),
                (TokenKind::Id, "y3"),
                (TokenKind::Semicolon, ""),
                (TokenKind::EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_digit_followed_by_letter_is_rejected() {
        for dialect in [Dialect::MiniC, Dialect::Xpp] {
            assert_matches!(
                error("12abc", dialect),
                LexerError::InvalidNumber { ref text, line: 1 } if text == "12abc"
            );
        }
    }

    #[test]
    fn test_xpp_keywords_and_literals() {
        assert_eq!(
            kinds("class A extends B { int x; string s; }", Dialect::Xpp),
            vec![
                TokenKind::Class,
                TokenKind::Id,
                TokenKind::Extends,
                TokenKind::Id,
                TokenKind::LeftCurlyBrace,
                TokenKind::Int,
                TokenKind::Id,
                TokenKind::Semicolon,
                TokenKind::String,
                TokenKind::Id,
                TokenKind::Semicolon,
                TokenKind::RightCurlyBrace,
                TokenKind::EndOfFile,
            ]
        );

        let tokens = Scanner::new("print \"a\\b\" % 7 . x", Dialect::Xpp)
            .tokenize()
            .unwrap();
        assert_eq!(tokens[0].lexeme, "print");
        assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[1].lexeme, "a\\b");
        assert_eq!(tokens[2].kind, TokenKind::ModuloOperator);
        assert_eq!(tokens[3].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[4].kind, TokenKind::Dot);
    }

    #[test]
    fn test_minic_keywords_are_reserved_word_tokens() {
        let tokens = Scanner::new("while (i) return 0;", Dialect::MiniC)
            .tokenize()
            .unwrap();
        assert_eq!(tokens[0].kind, TokenKind::ReservedWord);
        assert_eq!(tokens[0].lexeme, "while");
        assert_eq!(tokens[4].kind, TokenKind::ReservedWord);
    }

    #[test]
    fn test_two_character_operators_use_one_byte_lookahead() {
        assert_eq!(
            kinds("<= < >= > == = != ", Dialect::Xpp),
            vec![
                TokenKind::LessOrEqualThan,
                TokenKind::LessThan,
                TokenKind::GreaterOrEqualThan,
                TokenKind::GreaterThan,
                TokenKind::Equal,
                TokenKind::Assignment,
                TokenKind::NotEqual,
                TokenKind::EndOfFile,
            ]
        );
        // `<` followed directly by an identifier leaves the identifier intact
        let tokens = Scanner::new("a<b", Dialect::Xpp).tokenize().unwrap();
        assert_eq!(tokens[2].lexeme, "b");
    }

    #[test]
    fn test_logical_operators_are_minic_only() {
        assert_eq!(
            kinds("a && b || !c", Dialect::MiniC),
            vec![
                TokenKind::Id,
                TokenKind::AndOperator,
                TokenKind::Id,
                TokenKind::OrOperator,
                TokenKind::NotOperator,
                TokenKind::Id,
                TokenKind::EndOfFile,
            ]
        );

        assert_matches!(
            error("a & b", Dialect::MiniC),
            LexerError::IncompleteOperator { operator: '&', .. }
        );
        assert_matches!(
            error("a | b", Dialect::MiniC),
            LexerError::IncompleteOperator { operator: '|', .. }
        );
        assert_matches!(
            error("a && b", Dialect::Xpp),
            LexerError::InvalidCharacter { character: '&', .. }
        );
        assert_matches!(
            error("!a", Dialect::Xpp),
            LexerError::IncompleteOperator { operator: '!', .. }
        );
        assert_matches!(
            error("a % b", Dialect::MiniC),
            LexerError::InvalidCharacter { character: '%', .. }
        );
    }

    #[test]
    fn test_comments_are_skipped_and_lines_counted() {
        let mut scanner = Scanner::new(
            "// header\nint /* spans\ntwo lines */ x;\n",
            Dialect::Xpp,
        );
        let tokens = scanner.tokenize().unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].span.start.line, 2);
        assert_eq!(tokens[1].span.start.line, 3);
        assert_eq!(scanner.metrics().comments_skipped, 2);
        assert_eq!(scanner.metrics().lines, 4);
    }

    #[test]
    fn test_comment_at_end_of_input_without_newline() {
        assert_eq!(kinds("x // trailing", Dialect::Xpp).len(), 2);
        assert_eq!(kinds("x / y", Dialect::Xpp)[1], TokenKind::DivideOperator);
        assert_eq!(kinds("/***/", Dialect::Xpp), vec![TokenKind::EndOfFile]);
    }

    #[test]
    fn test_unterminated_comment_and_string() {
        assert_matches!(
            error("x /* never\nclosed", Dialect::Xpp),
            LexerError::UnterminatedComment { line: 2 }
        );
        assert_matches!(
            error("x /* almost *", Dialect::Xpp),
            LexerError::UnterminatedComment { .. }
        );
        assert_matches!(
            error("\"abc\ndef\"", Dialect::Xpp),
            LexerError::UnterminatedString { line: 1 }
        );
        assert_matches!(
            error("\"abc", Dialect::MiniC),
            LexerError::UnterminatedString { .. }
        );
        assert_matches!(
            error("\"a\tb\"", Dialect::MiniC),
            LexerError::NonPrintableCharacter { .. }
        );
    }

    #[test]
    fn test_minic_string_escapes() {
        let tokens = Scanner::new(r#""say \"hi\" \\ ok""#, Dialect::MiniC)
            .tokenize()
            .unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringConstant);
        assert_eq!(tokens[0].lexeme, r#"say "hi" \ ok"#);

        assert_matches!(
            error(r#""bad \n escape""#, Dialect::MiniC),
            LexerError::InvalidEscape { escape: 'n', .. }
        );
    }

    #[test]
    fn test_char_literals() {
        let tokens = Scanner::new(r"'a' '\n' '\0'", Dialect::MiniC)
            .tokenize()
            .unwrap();
        assert_eq!(tokens[0].kind, TokenKind::CharConstant);
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "\\n");
        assert_eq!(tokens[2].lexeme, "\\0");

        for bad in [r"'ab'", r"''", r"'\t'", r"'\'", "'a"] {
            assert_matches!(
                error(bad, Dialect::MiniC),
                LexerError::InvalidCharLiteral { .. },
                "{}",
                bad
            );
        }
        assert_matches!(
            error("'a'", Dialect::Xpp),
            LexerError::InvalidCharacter { character: '\'', .. }
        );
    }

    #[test]
    fn test_underscore_identifiers_by_dialect() {
        let tokens = Scanner::new("_tmp x_1", Dialect::Xpp).tokenize().unwrap();
        assert_eq!(tokens[0].lexeme, "_tmp");
        assert_eq!(tokens[1].lexeme, "x_1");

        assert_matches!(
            error("_tmp", Dialect::MiniC),
            LexerError::InvalidCharacter { character: '_', .. }
        );
    }

    #[test]
    fn test_invalid_bytes_report_their_line() {
        assert_matches!(
            error("x;\ny;\n@", Dialect::Xpp),
            LexerError::InvalidCharacter { character: '@', line: 3 }
        );
        assert_matches!(
            error("x\0", Dialect::Xpp),
            LexerError::InvalidCharacter { character: '\0', .. }
        );
    }

    #[test]
    fn test_custom_reserved_word_resolver() {
        struct Everything;
        impl ReservedWords for Everything {
            fn reserved_kind(&self, _lexeme: &str) -> Option<TokenKind> {
                Some(TokenKind::Print)
            }
        }

        let mut scanner = Scanner::new("anything", Dialect::Xpp);
        let token = scanner.next_token_with(&Everything).unwrap();
        assert_eq!(token.kind, TokenKind::Print);
        assert_eq!(token.lexeme, "anything");
    }

    #[test]
    fn test_end_of_file_is_sticky() {
        let mut scanner = Scanner::new("  \n", Dialect::Xpp);
        assert!(scanner.next_token().unwrap().is_eof());
        assert!(scanner.next_token().unwrap().is_eof());
        assert_eq!(scanner.line(), 2);
    }

    #[test]
    fn test_metrics_classify_tokens() {
        let mut scanner = Scanner::new("int x; x = 1 + 2;", Dialect::Xpp);
        scanner.tokenize().unwrap();
        let metrics = scanner.metrics();

        assert_eq!(metrics.total_tokens, 10);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.literal_tokens, 2);
        assert_eq!(metrics.operator_tokens, 2);
        assert_eq!(metrics.punctuation_tokens, 2);
    }
}
