//! Statements
//!
//! ```text
//! Statement → VarDecl | AtribStat ; | print Expr ; | read LValue ;
//!           | return Expr ; | super ( Args? ) ; | IfStat | ForStat
//!           | break ; | ;
//! AtribStat → LValue = ( AllocExpr | Expr )
//! IfStat    → if ( Expr ) { Statement* } [ else { Statement* } ]
//! ForStat   → for ( AtribStat? ; Expr? ; AtribStat? ) { Statement* }
//! ```

use super::error::ParseResult;
use super::parser::Parser;
use crate::tokens::TokenKind;

/// FIRST(Statement)
const STATEMENT_START: [TokenKind; 11] = [
    TokenKind::Int,
    TokenKind::String,
    TokenKind::Id,
    TokenKind::Print,
    TokenKind::Read,
    TokenKind::Return,
    TokenKind::Super,
    TokenKind::If,
    TokenKind::For,
    TokenKind::Break,
    TokenKind::Semicolon,
];

impl Parser {
    pub(super) fn statements(&mut self) -> ParseResult<()> {
        while self.at_any(&STATEMENT_START) {
            self.statement()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> ParseResult<()> {
        match self.lookahead.kind {
            TokenKind::Int | TokenKind::String => self.var_decl(false),
            TokenKind::Id => {
                self.atrib_stat()?;
                self.match_kind(TokenKind::Semicolon)
            }
            TokenKind::Print | TokenKind::Return => {
                self.advance()?;
                self.expression()?;
                self.match_kind(TokenKind::Semicolon)
            }
            TokenKind::Read => {
                self.advance()?;
                self.lvalue()?;
                self.match_kind(TokenKind::Semicolon)
            }
            TokenKind::Super => {
                self.advance()?;
                self.match_kind(TokenKind::LeftBracket)?;
                self.arg_list_opt()?;
                self.match_kind(TokenKind::RightBracket)?;
                self.match_kind(TokenKind::Semicolon)
            }
            TokenKind::If => self.if_stat(),
            TokenKind::For => self.for_stat(),
            TokenKind::Break => {
                self.advance()?;
                self.match_kind(TokenKind::Semicolon)
            }
            TokenKind::Semicolon => self.advance(),
            _ => Err(self.violation("expected statement")),
        }
    }

    fn atrib_stat(&mut self) -> ParseResult<()> {
        self.lvalue()?;
        self.match_kind(TokenKind::Assignment)?;

        if self.at_any(&[TokenKind::New, TokenKind::Int, TokenKind::String]) {
            self.alloc_expression()
        } else {
            self.expression()
        }
    }

    fn if_stat(&mut self) -> ParseResult<()> {
        self.match_kind(TokenKind::If)?;
        self.match_kind(TokenKind::LeftBracket)?;
        self.expression()?;
        self.match_kind(TokenKind::RightBracket)?;

        self.block()?;
        if self.at(TokenKind::Else) {
            self.advance()?;
            self.block()?;
        }
        Ok(())
    }

    /// `{ Statement* }` in its own scope
    fn block(&mut self) -> ParseResult<()> {
        self.match_kind(TokenKind::LeftCurlyBrace)?;
        self.enter_scope();
        self.statements()?;
        self.exit_scope();
        self.match_kind(TokenKind::RightCurlyBrace)
    }

    fn for_stat(&mut self) -> ParseResult<()> {
        self.match_kind(TokenKind::For)?;
        self.match_kind(TokenKind::LeftBracket)?;

        // One scope covers the header and the body
        self.enter_scope();

        if self.at(TokenKind::Id) {
            self.atrib_stat()?;
        }
        self.match_kind(TokenKind::Semicolon)?;
        if self.starts_expression() {
            self.expression()?;
        }
        self.match_kind(TokenKind::Semicolon)?;
        if self.at(TokenKind::Id) {
            self.atrib_stat()?;
        }
        self.match_kind(TokenKind::RightBracket)?;

        self.match_kind(TokenKind::LeftCurlyBrace)?;
        self.statements()?;
        self.match_kind(TokenKind::RightCurlyBrace)?;

        self.exit_scope();
        Ok(())
    }
}
