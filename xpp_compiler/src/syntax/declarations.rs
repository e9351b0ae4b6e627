//! Program, class and member declarations
//!
//! ```text
//! Program       → ClassList EOF
//! ClassList     → ClassDecl { ClassDecl }
//! ClassDecl     → class ID [ extends ID ] ClassBody
//! ClassBody     → { VarDecl* ConstructDecl* MethodDecl* }
//! VarDecl       → (int | string) [ '[' ']' ] ID { , ID } ;
//! ConstructDecl → constructor MethodBody
//! MethodDecl    → Type [ '[' ']' ] ID MethodBody
//! MethodBody    → ( [ Param { , Param } ] ) { Statement* }
//! Param         → Type [ '[' ']' ] ID
//! Type          → int | string | ID
//! ```

use super::error::{ParseResult, SyntaxError};
use super::parser::Parser;
use crate::semantic_analysis::{declare_class, declare_method, declare_parameter, declare_variable};
use crate::symbols::DeclaredType;
use crate::tokens::TokenKind;

/// FIRST(Type)
const TYPE_START: [TokenKind; 3] = [TokenKind::Int, TokenKind::String, TokenKind::Id];

/// Types a variable declaration may start with
const PRIMITIVE_START: [TokenKind; 2] = [TokenKind::Int, TokenKind::String];

impl Parser {
    pub(super) fn program(&mut self) -> ParseResult<()> {
        self.class_list()?;
        self.match_kind(TokenKind::EndOfFile)
    }

    fn class_list(&mut self) -> ParseResult<()> {
        self.class_decl()?;
        while self.at(TokenKind::Class) {
            self.class_decl()?;
        }
        Ok(())
    }

    fn class_decl(&mut self) -> ParseResult<()> {
        self.match_kind(TokenKind::Class)?;
        let name = self.expect_id()?;

        let parent = if self.at(TokenKind::Extends) {
            self.advance()?;
            Some(self.expect_id()?)
        } else {
            None
        };

        let line = name.span.start.line;
        self.check(|table| declare_class(table, &name, parent.as_ref(), line))?;
        self.report.classes.push(name.lexeme.clone());

        self.enter_scope();
        self.class_body()?;
        self.exit_scope();

        log_debug!("Class parsed", "class" => name.lexeme, "line" => line);
        Ok(())
    }

    fn class_body(&mut self) -> ParseResult<()> {
        self.match_kind(TokenKind::LeftCurlyBrace)?;

        while self.at_any(&PRIMITIVE_START) {
            self.var_decl(true)?;
        }
        while self.at(TokenKind::Constructor) {
            self.constructor_decl()?;
        }
        while self.at_any(&TYPE_START) {
            self.method_decl()?;
        }

        self.match_kind(TokenKind::RightCurlyBrace)
    }

    /// Shared by class bodies and statement lists
    ///
    /// Only a class member can be a method in disguise; inside a statement
    /// list `int f(` is a plain missing `;`.
    pub(super) fn var_decl(&mut self, class_member: bool) -> ParseResult<()> {
        if !self.at_any(&PRIMITIVE_START) {
            return Err(self.violation("expected variable type 'int' or 'string'"));
        }
        let ty = self.type_name()?;

        self.var_decl_id(&ty, class_member)?;
        while self.at(TokenKind::Comma) {
            self.advance()?;
            self.var_decl_id(&ty, class_member)?;
        }
        self.match_kind(TokenKind::Semicolon)
    }

    fn var_decl_id(&mut self, ty: &DeclaredType, class_member: bool) -> ParseResult<()> {
        let name = self.expect_id()?;
        if class_member && self.at(TokenKind::LeftBracket) {
            return Err(SyntaxError::MethodBeforeVariables {
                name: name.lexeme,
                line: name.span.start.line,
            }
            .into());
        }

        let line = name.span.start.line;
        self.check(|table| declare_variable(table, &name, ty, line))
    }

    /// Type with an optional `[]` suffix
    fn type_name(&mut self) -> ParseResult<DeclaredType> {
        if !self.at_any(&TYPE_START) {
            return Err(self.violation("expected type (int, string or class name)"));
        }

        let mut ty = DeclaredType::new(self.lookahead.lexeme.clone());
        self.advance()?;

        if self.at(TokenKind::LeftSquareBracket) {
            self.advance()?;
            self.match_kind(TokenKind::RightSquareBracket)?;
            ty = ty.array();
        }
        Ok(ty)
    }

    fn constructor_decl(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.match_kind(TokenKind::Constructor)?;

        log_info!("Constructor declared",
            "class" => self.report.classes.last().map(String::as_str).unwrap_or("-"),
            "line" => line
        );

        self.enter_scope();
        self.method_body()?;
        self.exit_scope();
        Ok(())
    }

    fn method_decl(&mut self) -> ParseResult<()> {
        let ty = self.type_name()?;
        let name = self.expect_id()?;

        let line = name.span.start.line;
        self.check(|table| declare_method(table, &name, &ty, line))?;

        self.enter_scope();
        self.method_body()?;
        self.exit_scope();
        Ok(())
    }

    fn method_body(&mut self) -> ParseResult<()> {
        self.match_kind(TokenKind::LeftBracket)?;
        if self.at_any(&TYPE_START) {
            self.param()?;
            while self.at(TokenKind::Comma) {
                self.advance()?;
                self.param()?;
            }
        }
        self.match_kind(TokenKind::RightBracket)?;

        self.match_kind(TokenKind::LeftCurlyBrace)?;
        self.statements()?;
        self.match_kind(TokenKind::RightCurlyBrace)
    }

    fn param(&mut self) -> ParseResult<()> {
        let ty = self.type_name()?;
        let name = self.expect_id()?;

        let line = name.span.start.line;
        self.check(|table| declare_parameter(table, &name, &ty, line))
    }
}
