//! hilite - cached per-line syntax decoration
//!
//! A document is a list of line elements. `LineDecorator` turns each line
//! into styled `RangeAnnotation`s by tokenizing it with a grammar, and
//! remembers the result so unchanged lines are not tokenized again. The
//! `render` module writes decorated documents to a terminal.

pub mod config;
pub mod decorator;
pub mod document;
pub mod error;
pub mod render;
pub mod syntax;
pub mod theme;

pub use decorator::{
    CacheEntry, DecorateStats, DecorationCache, IdentityCache, LineDecorator, Point,
    PositionalCache, RangeAnnotation,
};
pub use document::{ContentNode, Document, Element, Node, NodeId, Path};
pub use error::{HiliteError, Result};
pub use syntax::{Grammar, GrammarRegistry, Token, TokenType, Tokenizer};
pub use theme::Theme;
