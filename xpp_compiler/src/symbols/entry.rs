//! Symbol table entries

use crate::config::constants::compile_time::semantic::{CLASS_TYPE, PRIMITIVE_TYPES, VOID_TYPE};
use crate::tokens::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a declared name denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Keyword,
    ClassName,
    Variable,
    Method,
    Parameter,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Keyword => "keyword",
            SymbolKind::ClassName => "class",
            SymbolKind::Variable => "variable",
            SymbolKind::Method => "method",
            SymbolKind::Parameter => "parameter",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type written in a declaration, threaded down to the declared names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredType {
    pub name: String,
    pub is_array: bool,
}

impl DeclaredType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVE_TYPES.contains(&self.name.as_str())
    }

    pub fn is_void(&self) -> bool {
        self.name == VOID_TYPE
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Semantic facts about one declared name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StEntry {
    pub token: Token,
    pub reserved: bool,
    pub kind: SymbolKind,
    /// Primitive or class name; `class` for class names, empty for keywords
    pub type_name: String,
    pub is_array: bool,
    pub parent_class: Option<String>,
    /// Declaration line; 0 for seeded keywords
    pub line: u32,
}

impl StEntry {
    fn declared(token: Token, kind: SymbolKind, ty: &DeclaredType, line: u32) -> Self {
        Self {
            token,
            reserved: false,
            kind,
            type_name: ty.name.clone(),
            is_array: ty.is_array,
            parent_class: None,
            line,
        }
    }

    pub fn keyword(token: Token) -> Self {
        Self {
            token,
            reserved: true,
            kind: SymbolKind::Keyword,
            type_name: String::new(),
            is_array: false,
            parent_class: None,
            line: 0,
        }
    }

    pub fn class(token: Token, parent_class: Option<String>, line: u32) -> Self {
        Self {
            token,
            reserved: false,
            kind: SymbolKind::ClassName,
            type_name: CLASS_TYPE.to_string(),
            is_array: false,
            parent_class,
            line,
        }
    }

    pub fn variable(token: Token, ty: &DeclaredType, line: u32) -> Self {
        Self::declared(token, SymbolKind::Variable, ty, line)
    }

    pub fn method(token: Token, ty: &DeclaredType, line: u32) -> Self {
        Self::declared(token, SymbolKind::Method, ty, line)
    }

    pub fn parameter(token: Token, ty: &DeclaredType, line: u32) -> Self {
        Self::declared(token, SymbolKind::Parameter, ty, line)
    }

    pub fn name(&self) -> &str {
        &self.token.lexeme
    }

    pub fn is_class(&self) -> bool {
        self.kind == SymbolKind::ClassName
    }
}
