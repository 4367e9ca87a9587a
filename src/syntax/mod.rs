//! Syntax module
//!
//! This module provides everything needed to turn a line of text into
//! classified tokens:
//! - Token types and the `Tokenizer` seam
//! - Regex-driven rules and grammars
//! - Built-in grammars and a registry to look them up
//! - Loading user grammars from TOML

mod builtin;
mod grammar;
mod loader;
mod registry;
mod rules;
mod style;
mod tokens;

pub use builtin::{css_grammar, javascript_grammar, markdown_grammar, python_grammar};
pub use grammar::Grammar;
pub use loader::{load_grammar_file, parse_grammar};
pub use registry::GrammarRegistry;
pub use rules::{DelimitedRule, PatternRule};
pub use style::{Color, Style};
pub use tokens::{Token, TokenType, Tokenizer};
