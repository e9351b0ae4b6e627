//! Recursive-descent parser core
//!
//! The parser pulls tokens from the scanner on demand and keeps exactly one
//! token of lookahead. Each grammar rule is one method; the rules live in
//! `declarations`, `statements` and `expressions`. This file holds the
//! shared state and the `advance` / `match_kind` primitives.

use super::error::{ParseError, ParseResult, SyntaxError};
use crate::lexical::{Dialect, LexicalMetrics, Scanner};
use crate::logging::codes;
use crate::semantic_analysis::SemanticResult;
use crate::symbols::SymbolTable;
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use serde::{Deserialize, Serialize};

/// Whether semantic actions run alongside the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Grammar only; keywords come from the fixed table
    Syntax,
    /// Grammar plus declaration and use checks; keywords come from the
    /// symbol table's root scope
    Semantic,
}

/// Summary of a successful parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Tokens consumed, END_OF_FILE included
    pub tokens_consumed: usize,
    pub scopes_entered: usize,
    pub scopes_exited: usize,
    pub max_scope_depth: usize,
    /// Declared classes in source order
    pub classes: Vec<String>,
    pub lines: u32,
}

pub struct Parser {
    pub(super) scanner: Scanner,
    pub(super) lookahead: Token,
    pub(super) symbols: SymbolTable,
    pub(super) mode: ParseMode,
    pub(super) report: ParseReport,
}

impl Parser {
    pub fn new(source: impl Into<Vec<u8>>, mode: ParseMode) -> Self {
        let symbols = match mode {
            ParseMode::Syntax => SymbolTable::new(),
            ParseMode::Semantic => SymbolTable::with_reserved_words(),
        };

        Self {
            scanner: Scanner::new(source, Dialect::Xpp),
            lookahead: Token::new(TokenKind::EndOfFile, "", Span::default()),
            symbols,
            mode,
            report: ParseReport::default(),
        }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn lexical_metrics(&self) -> &LexicalMetrics {
        self.scanner.metrics()
    }

    /// Parse one compilation unit through END_OF_FILE
    pub fn run(mut self) -> ParseResult<ParseReport> {
        log_info!("Parsing started", "mode" => format!("{:?}", self.mode));

        let result = self.prime().and_then(|_| self.program());
        match result {
            Ok(()) => {
                self.report.lines = self.scanner.metrics().lines;
                let code = match self.mode {
                    ParseMode::Syntax => codes::success::SYNTAX_VALIDATION_PASSED,
                    ParseMode::Semantic => codes::success::SEMANTIC_ANALYSIS_COMPLETE,
                };
                log_success!(code, "Parsing completed",
                    "tokens" => self.report.tokens_consumed,
                    "classes" => self.report.classes.len(),
                    "scopes" => self.report.scopes_entered,
                    "max_depth" => self.report.max_scope_depth
                );
                Ok(self.report)
            }
            Err(error) => {
                // Lexical failures are already logged by the scanner
                if !matches!(error, ParseError::Lexical(_)) {
                    log_error!(error.error_code(), "Parsing failed",
                        span = self.lookahead.span,
                        "stage" => error.stage(),
                        "line" => error.line(),
                        "detail" => &error
                    );
                }
                Err(error)
            }
        }
    }

    /// Read the first lookahead token
    fn prime(&mut self) -> ParseResult<()> {
        self.lookahead = self.fetch()?;
        Ok(())
    }

    fn fetch(&mut self) -> ParseResult<Token> {
        let token = match self.mode {
            ParseMode::Syntax => self.scanner.next_token()?,
            ParseMode::Semantic => self.scanner.next_token_with(&self.symbols)?,
        };
        Ok(token)
    }

    // ========================================================================
    // PRIMITIVES
    // ========================================================================

    /// Consume the lookahead unconditionally
    pub(super) fn advance(&mut self) -> ParseResult<()> {
        self.report.tokens_consumed += 1;
        if self.lookahead.is_eof() {
            return Ok(());
        }
        self.lookahead = self.fetch()?;
        Ok(())
    }

    /// Consume the lookahead if it is `kind`, otherwise fail
    pub(super) fn match_kind(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.lookahead.is(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind))
        }
    }

    /// Consume an identifier and hand it back
    pub(super) fn expect_id(&mut self) -> ParseResult<Token> {
        if !self.at(TokenKind::Id) {
            return Err(self.unexpected(TokenKind::Id));
        }
        let token = self.lookahead.clone();
        self.advance()?;
        Ok(token)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.lookahead.is(kind)
    }

    pub(super) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.lookahead.is(*kind))
    }

    pub(super) fn line(&self) -> u32 {
        self.lookahead.span.start.line
    }

    pub(super) fn unexpected(&self, expected: TokenKind) -> ParseError {
        SyntaxError::UnexpectedToken {
            expected,
            found: self.lookahead.kind,
            lexeme: self.lookahead.lexeme.clone(),
            line: self.line(),
        }
        .into()
    }

    pub(super) fn violation(&self, message: &str) -> ParseError {
        SyntaxError::GrammarViolation {
            message: message.to_string(),
            found: self.lookahead.kind,
            lexeme: self.lookahead.lexeme.clone(),
            line: self.line(),
        }
        .into()
    }

    // ========================================================================
    // SCOPES AND SEMANTIC ACTIONS
    // ========================================================================

    pub(super) fn enter_scope(&mut self) {
        self.symbols.enter_scope();
        self.report.scopes_entered += 1;
        self.report.max_scope_depth = self.report.max_scope_depth.max(self.symbols.depth());
        log_debug!("Scope entered", "depth" => self.symbols.depth());
    }

    pub(super) fn exit_scope(&mut self) {
        if self.symbols.exit_scope() {
            self.report.scopes_exited += 1;
        }
        log_debug!("Scope exited", "depth" => self.symbols.depth());
    }

    /// Run a semantic action in semantic mode; a no-op otherwise
    pub(super) fn check<F>(&mut self, action: F) -> ParseResult<()>
    where
        F: FnOnce(&mut SymbolTable) -> SemanticResult<()>,
    {
        if self.mode == ParseMode::Semantic {
            action(&mut self.symbols).map_err(|error| {
                log_debug!("Semantic check rejected declaration",
                    "error_type" => error.error_type(),
                    "identifier" => error.identifier(),
                    "depth" => self.symbols.depth()
                );
                error
            })?;
        }
        Ok(())
    }
}
