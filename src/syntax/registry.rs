//! Grammar registry
//!
//! This module provides the GrammarRegistry that resolves grammar names,
//! aliases and file extensions to shared grammar definitions.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use super::builtin;
use super::grammar::Grammar;
use crate::error::{HiliteError, Result};

/// Registry of available grammars
pub struct GrammarRegistry {
    /// Loaded grammars by canonical (lowercase) name
    grammars: HashMap<String, Rc<Grammar>>,
    /// Alias to canonical name mapping
    alias_map: HashMap<String, String>,
    /// Extension to canonical name mapping
    extension_map: HashMap<String, String>,
}

impl GrammarRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            grammars: HashMap::new(),
            alias_map: HashMap::new(),
            extension_map: HashMap::new(),
        }
    }

    /// Create a registry with the built-in grammars
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for grammar in builtin::all_grammars() {
            registry.add(grammar);
        }
        registry
    }

    /// Add a grammar, replacing any grammar of the same name
    pub fn add(&mut self, grammar: Grammar) {
        let name = grammar.name.to_lowercase();
        debug!(
            grammar = %name,
            patterns = grammar.patterns.len(),
            delimited = grammar.delimited.len(),
            "registering grammar"
        );

        for alias in &grammar.aliases {
            self.alias_map.insert(alias.to_lowercase(), name.clone());
        }
        for ext in &grammar.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.grammars.insert(name, Rc::new(grammar));
    }

    /// Look up a grammar by name or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<Rc<Grammar>> {
        let key = name.to_lowercase();
        let canonical = self.alias_map.get(&key).unwrap_or(&key);
        self.grammars.get(canonical).cloned()
    }

    /// Look up a grammar, failing with `UnknownLanguage`
    pub fn resolve(&self, name: &str) -> Result<Rc<Grammar>> {
        self.get(name)
            .ok_or_else(|| HiliteError::UnknownLanguage(name.to_string()))
    }

    /// Detect grammar name from filename
    pub fn detect(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// List available grammar names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.grammars.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}
