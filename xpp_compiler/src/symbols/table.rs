//! Scoped symbol table
//!
//! Scopes are kept as an owned stack. Index 0 is the root scope, which holds
//! the reserved words and every class; it is never popped. Entering a scope
//! pushes an empty map and exiting drops it, so bindings declared inside a
//! construct are unreachable once the construct ends.

use super::entry::StEntry;
use crate::config::constants::compile_time::lexical::XPP_RESERVED_WORDS;
use crate::lexical::{xpp_keyword_kind, ReservedWords};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Scope {
    symbols: HashMap<String, StEntry>,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Table with an empty root scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Table whose root scope is seeded with the class grammar's keywords
    pub fn with_reserved_words() -> Self {
        let mut table = Self::new();
        for word in XPP_RESERVED_WORDS {
            let kind = xpp_keyword_kind(word).unwrap_or(TokenKind::Id);
            table.add(StEntry::keyword(Token::new(kind, word, Span::default())));
        }
        table
    }

    /// Insert into the current scope; false (and no change) if the name is
    /// already bound in this exact scope
    pub fn add(&mut self, entry: StEntry) -> bool {
        Self::insert(self.current_mut(), entry)
    }

    /// Insert into the root scope regardless of the current depth
    pub fn add_global(&mut self, entry: StEntry) -> bool {
        Self::insert(&mut self.scopes[0], entry)
    }

    fn insert(scope: &mut Scope, entry: StEntry) -> bool {
        let name = entry.name().to_string();
        if scope.symbols.contains_key(&name) {
            return false;
        }
        scope.symbols.insert(name, entry);
        true
    }

    /// Nearest binding, searching from the current scope out to the root
    pub fn get(&self, name: &str) -> Option<&StEntry> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.symbols.get(name))
    }

    /// Binding in the current scope only
    pub fn get_local(&self, name: &str) -> Option<&StEntry> {
        self.current().symbols.get(name)
    }

    /// Binding in the root scope only
    pub fn get_global(&self, name: &str) -> Option<&StEntry> {
        self.scopes[0].symbols.get(name)
    }

    /// Remove from the current scope only; enclosing scopes are untouched
    pub fn remove(&mut self, name: &str) -> bool {
        self.current_mut().symbols.remove(name).is_some()
    }

    /// Drop every binding in the current scope
    pub fn clear(&mut self) {
        self.current_mut().symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.current().symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().symbols.is_empty()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Leave the current scope; the root cannot be left and returns false
    pub fn exit_scope(&mut self) -> bool {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            true
        } else {
            false
        }
    }

    /// Number of scopes above the root
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    fn current(&self) -> &Scope {
        // The root scope is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl ReservedWords for SymbolTable {
    fn reserved_kind(&self, lexeme: &str) -> Option<TokenKind> {
        self.get_global(lexeme)
            .filter(|entry| entry.reserved)
            .map(|entry| entry.token.kind)
    }
}
