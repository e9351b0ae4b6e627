//! Declaration and use checks run by the parser as it recognizes identifiers
//!
//! Every action works on the table's current scope chain at the moment of
//! the call, so the parser must invoke them before leaving the construct
//! that owns the scope.

use super::types::{SemanticError, SemanticResult};
use crate::logging::codes;
use crate::symbols::{DeclaredType, StEntry, SymbolKind, SymbolTable};
use crate::tokens::Token;

/// Declare a top-level class, optionally extending an earlier one
pub fn declare_class(
    table: &mut SymbolTable,
    name: &Token,
    parent: Option<&Token>,
    line: u32,
) -> SemanticResult<()> {
    if let Some(existing) = table.get_global(&name.lexeme) {
        return Err(SemanticError::DuplicateClass {
            name: name.lexeme.clone(),
            previous_line: existing.line,
            line,
        });
    }

    if let Some(parent) = parent {
        let declared = table
            .get_global(&parent.lexeme)
            .is_some_and(StEntry::is_class);
        if !declared {
            return Err(SemanticError::UndeclaredParentClass {
                parent: parent.lexeme.clone(),
                line,
            });
        }
    }

    let parent_name = parent.map(|p| p.lexeme.clone());
    table.add_global(StEntry::class(name.clone(), parent_name.clone(), line));

    log_success!(codes::success::SYMBOL_DECLARED, "Class declared",
        "class" => name.lexeme,
        "parent" => parent_name.as_deref().unwrap_or("-"),
        "line" => line
    );
    Ok(())
}

/// Declare a variable in the current scope
pub fn declare_variable(
    table: &mut SymbolTable,
    name: &Token,
    ty: &DeclaredType,
    line: u32,
) -> SemanticResult<()> {
    declare(table, StEntry::variable(name.clone(), ty, line), ty, line)
}

/// Declare a method in the current scope; `void` is accepted as its type
pub fn declare_method(
    table: &mut SymbolTable,
    name: &Token,
    ty: &DeclaredType,
    line: u32,
) -> SemanticResult<()> {
    declare(table, StEntry::method(name.clone(), ty, line), ty, line)
}

/// Declare a parameter in the method's scope
pub fn declare_parameter(
    table: &mut SymbolTable,
    name: &Token,
    ty: &DeclaredType,
    line: u32,
) -> SemanticResult<()> {
    declare(table, StEntry::parameter(name.clone(), ty, line), ty, line)
}

fn declare(
    table: &mut SymbolTable,
    entry: StEntry,
    ty: &DeclaredType,
    line: u32,
) -> SemanticResult<()> {
    if let Some(existing) = table.get_local(entry.name()) {
        return Err(SemanticError::duplicate_declaration(
            entry.name(),
            entry.kind,
            existing.line,
            line,
        ));
    }

    let class_typed = !ty.is_primitive() && !(entry.kind == SymbolKind::Method && ty.is_void());
    if class_typed {
        check_class_declared(table, &ty.name, line)?;
    }

    log_info!("Symbol declared",
        "kind" => entry.kind,
        "name" => entry.name(),
        "type" => ty,
        "depth" => table.depth(),
        "line" => line
    );
    table.add(entry);
    Ok(())
}

/// The head of an l-value must resolve and must not be a reserved word
pub fn check_variable_declared(table: &SymbolTable, name: &Token, line: u32) -> SemanticResult<()> {
    match table.get(&name.lexeme) {
        None => Err(SemanticError::UndeclaredVariable {
            name: name.lexeme.clone(),
            line,
        }),
        Some(entry) if entry.reserved => Err(SemanticError::ReservedWordAsIdentifier {
            name: name.lexeme.clone(),
            line,
        }),
        Some(entry) => {
            log_debug!("Identifier resolved",
                "name" => name.lexeme,
                "kind" => entry.kind,
                "declared_at" => entry.line,
                "line" => line
            );
            Ok(())
        }
    }
}

/// `name` must be a class declared in the root scope
pub fn check_class_declared(table: &SymbolTable, name: &str, line: u32) -> SemanticResult<()> {
    match table.get_global(name) {
        Some(entry) if entry.is_class() => Ok(()),
        _ => Err(SemanticError::undeclared_class(name, line)),
    }
}
