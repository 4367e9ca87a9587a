//! Built-in grammars
//!
//! This module provides grammars for the languages a fresh registry
//! knows about.

mod css;
mod javascript;
mod markdown;
mod python;

pub use css::css_grammar;
pub use javascript::javascript_grammar;
pub use markdown::markdown_grammar;
pub use python::python_grammar;

use super::grammar::Grammar;

/// Get all built-in grammars
pub fn all_grammars() -> Vec<Grammar> {
    vec![
        javascript_grammar(),
        python_grammar(),
        markdown_grammar(),
        css_grammar(),
    ]
}
