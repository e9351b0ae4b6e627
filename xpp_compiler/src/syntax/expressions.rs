//! Expressions, allocations and l-values
//!
//! ```text
//! Expr         → NumExpr [ relop NumExpr ]
//! NumExpr      → Term { (+|-) Term }
//! Term         → Unary { (*|/|%) Unary }
//! Unary        → [ + | - ] Factor
//! Factor       → INTEGER_LITERAL | STRING_LITERAL | LValue | ( Expr )
//! AllocExpr    → new ID ( Args? ) | (int | string) [ Expr ]
//! LValue       → ID LValueSuffix
//! LValueSuffix → { . ID | [ Expr ] | ( Args? ) }
//! Args         → Expr { , Expr }
//! ```

use super::error::ParseResult;
use super::parser::Parser;
use crate::semantic_analysis::{check_class_declared, check_variable_declared};
use crate::tokens::TokenKind;

/// FIRST(Expr)
const EXPRESSION_START: [TokenKind; 6] = [
    TokenKind::Id,
    TokenKind::IntegerLiteral,
    TokenKind::StringLiteral,
    TokenKind::PlusOperator,
    TokenKind::MinusOperator,
    TokenKind::LeftBracket,
];

const ADDITIVE: [TokenKind; 2] = [TokenKind::PlusOperator, TokenKind::MinusOperator];

const MULTIPLICATIVE: [TokenKind; 3] = [
    TokenKind::MultiplyOperator,
    TokenKind::DivideOperator,
    TokenKind::ModuloOperator,
];

impl Parser {
    pub(super) fn starts_expression(&self) -> bool {
        self.at_any(&EXPRESSION_START)
    }

    pub(super) fn expression(&mut self) -> ParseResult<()> {
        self.num_expression()?;
        if self.lookahead.kind.is_relational() {
            self.advance()?;
            self.num_expression()?;
        }
        Ok(())
    }

    fn num_expression(&mut self) -> ParseResult<()> {
        self.term()?;
        while self.at_any(&ADDITIVE) {
            self.advance()?;
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> ParseResult<()> {
        self.unary()?;
        while self.at_any(&MULTIPLICATIVE) {
            self.advance()?;
            self.unary()?;
        }
        Ok(())
    }

    fn unary(&mut self) -> ParseResult<()> {
        if self.at_any(&ADDITIVE) {
            self.advance()?;
        }
        self.factor()
    }

    fn factor(&mut self) -> ParseResult<()> {
        match self.lookahead.kind {
            TokenKind::IntegerLiteral | TokenKind::StringLiteral => self.advance(),
            TokenKind::Id => self.lvalue(),
            TokenKind::LeftBracket => {
                self.advance()?;
                self.expression()?;
                self.match_kind(TokenKind::RightBracket)
            }
            _ => Err(self.violation("expected literal, l-value or parenthesized expression")),
        }
    }

    /// `new C(args)` or `int[size]` / `string[size]`
    pub(super) fn alloc_expression(&mut self) -> ParseResult<()> {
        match self.lookahead.kind {
            TokenKind::New => {
                self.advance()?;
                let class = self.expect_id()?;
                let line = class.span.start.line;
                self.check(|table| check_class_declared(table, &class.lexeme, line))?;
                log_info!("Object allocated", "class" => class.lexeme, "line" => line);

                self.match_kind(TokenKind::LeftBracket)?;
                self.arg_list_opt()?;
                self.match_kind(TokenKind::RightBracket)
            }
            // `C[n]` with a class name reads as an indexed l-value instead
            TokenKind::Int | TokenKind::String => {
                let element = self.lookahead.clone();
                let line = element.span.start.line;
                self.advance()?;

                self.match_kind(TokenKind::LeftSquareBracket)?;
                self.expression()?;
                self.match_kind(TokenKind::RightSquareBracket)?;
                log_info!("Array allocated", "type" => element.lexeme, "line" => line);
                Ok(())
            }
            _ => Err(self.violation("expected allocation (new ID(...) or Type[...])")),
        }
    }

    /// The head identifier must be declared; the suffix chain is unchecked
    pub(super) fn lvalue(&mut self) -> ParseResult<()> {
        let head = self.expect_id()?;
        let line = head.span.start.line;
        self.check(|table| check_variable_declared(table, &head, line))?;
        self.lvalue_suffix()
    }

    fn lvalue_suffix(&mut self) -> ParseResult<()> {
        loop {
            match self.lookahead.kind {
                TokenKind::Dot => {
                    self.advance()?;
                    self.expect_id()?;
                }
                TokenKind::LeftSquareBracket => {
                    self.advance()?;
                    self.expression()?;
                    self.match_kind(TokenKind::RightSquareBracket)?;
                }
                TokenKind::LeftBracket => {
                    self.advance()?;
                    self.arg_list_opt()?;
                    self.match_kind(TokenKind::RightBracket)?;
                }
                _ => return Ok(()),
            }
        }
    }

    pub(super) fn arg_list_opt(&mut self) -> ParseResult<()> {
        if !self.starts_expression() {
            return Ok(());
        }
        self.expression()?;
        while self.at(TokenKind::Comma) {
            self.advance()?;
            self.expression()?;
        }
        Ok(())
    }
}
