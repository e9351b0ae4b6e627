//! Inline semantic checks for the class grammar
//!
//! The parser calls these actions in check mode at the moment a declaration
//! or use is recognized. There is no separate pass over a tree: the symbol
//! table's current scope chain is the only context.

pub mod actions;
pub mod types;

pub use actions::{
    check_class_declared, check_variable_declared, declare_class, declare_method,
    declare_parameter, declare_variable,
};
pub use types::{SemanticError, SemanticResult};
