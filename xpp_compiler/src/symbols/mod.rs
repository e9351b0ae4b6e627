//! Symbol table with a stack of lexical scopes
//!
//! - **[`SymbolTable`]** - add / get / remove over the current scope chain
//! - **[`StEntry`]** - facts recorded for one declared name
//! - **[`DeclaredType`]** - type and array-ness threaded through declarations

pub mod entry;
pub mod table;

pub use entry::{DeclaredType, StEntry, SymbolKind};
pub use table::SymbolTable;
