//! Semantic error types

use crate::logging::codes;
use crate::symbols::SymbolKind;
use thiserror::Error;

/// Result type for semantic actions
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Declaration and use-before-declaration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Semantic error at line {line}: class '{name}' already declared at line {previous_line}")]
    DuplicateClass {
        name: String,
        previous_line: u32,
        line: u32,
    },

    #[error("Semantic error at line {line}: parent class '{parent}' not declared")]
    UndeclaredParentClass { parent: String, line: u32 },

    #[error("Semantic error at line {line}: class '{name}' not declared")]
    UndeclaredClass { name: String, line: u32 },

    #[error("Semantic error at line {line}: {kind} '{name}' already declared in this scope at line {previous_line}")]
    DuplicateDeclaration {
        name: String,
        kind: SymbolKind,
        previous_line: u32,
        line: u32,
    },

    #[error("Semantic error at line {line}: variable '{name}' not declared")]
    UndeclaredVariable { name: String, line: u32 },

    #[error("Semantic error at line {line}: reserved word '{name}' used as an identifier")]
    ReservedWordAsIdentifier { name: String, line: u32 },
}

impl SemanticError {
    pub fn duplicate_declaration(name: &str, kind: SymbolKind, previous_line: u32, line: u32) -> Self {
        Self::DuplicateDeclaration {
            name: name.to_string(),
            kind,
            previous_line,
            line,
        }
    }

    pub fn undeclared_class(name: &str, line: u32) -> Self {
        Self::UndeclaredClass {
            name: name.to_string(),
            line,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            SemanticError::DuplicateClass { line, .. }
            | SemanticError::UndeclaredParentClass { line, .. }
            | SemanticError::UndeclaredClass { line, .. }
            | SemanticError::DuplicateDeclaration { line, .. }
            | SemanticError::UndeclaredVariable { line, .. }
            | SemanticError::ReservedWordAsIdentifier { line, .. } => *line,
        }
    }

    /// Identifier the diagnostic is about
    pub fn identifier(&self) -> &str {
        match self {
            SemanticError::DuplicateClass { name, .. }
            | SemanticError::UndeclaredClass { name, .. }
            | SemanticError::DuplicateDeclaration { name, .. }
            | SemanticError::UndeclaredVariable { name, .. }
            | SemanticError::ReservedWordAsIdentifier { name, .. } => name,
            SemanticError::UndeclaredParentClass { parent, .. } => parent,
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            SemanticError::DuplicateClass { .. } => codes::semantic::DUPLICATE_CLASS,
            SemanticError::UndeclaredParentClass { .. } => codes::semantic::UNDECLARED_PARENT_CLASS,
            SemanticError::UndeclaredClass { .. } => codes::semantic::UNDECLARED_CLASS,
            SemanticError::DuplicateDeclaration { .. } => codes::semantic::DUPLICATE_SYMBOL,
            SemanticError::UndeclaredVariable { .. } => codes::semantic::UNDECLARED_IDENTIFIER,
            SemanticError::ReservedWordAsIdentifier { .. } => codes::semantic::RESERVED_WORD_MISUSE,
        }
    }

    /// Get error type string for logging context
    pub fn error_type(&self) -> &'static str {
        match self {
            SemanticError::DuplicateClass { .. } => "DuplicateClass",
            SemanticError::UndeclaredParentClass { .. } => "UndeclaredParentClass",
            SemanticError::UndeclaredClass { .. } => "UndeclaredClass",
            SemanticError::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            SemanticError::UndeclaredVariable { .. } => "UndeclaredVariable",
            SemanticError::ReservedWordAsIdentifier { .. } => "ReservedWordAsIdentifier",
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
