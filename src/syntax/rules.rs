//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types a grammar is made of. Both rule
//! kinds search the whole text from a byte offset, so anchors such as `^`
//! and `\b` see the surrounding context.

use regex::Regex;

use super::tokens::TokenType;
use crate::error::{HiliteError, Result};

/// A single-line pattern rule
///
/// Matches a regex pattern and assigns a token type to the match.
/// When a capture group is set, only that group is highlighted; the rest of
/// the match is left for other rules.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token type to assign to matches
    pub token_type: TokenType,
    /// Priority (higher wins when two rules match at the same offset)
    pub priority: i32,
    /// Capture group that selects the highlighted part of the match
    pub group: Option<usize>,
}

impl PatternRule {
    /// Create a new pattern rule, `None` if the regex does not compile
    pub fn new(name: &str, pattern: &str, token_type: TokenType, priority: i32) -> Option<Self> {
        Self::try_new(name, pattern, token_type, priority).ok()
    }

    /// Create a new pattern rule, reporting regex errors
    pub fn try_new(name: &str, pattern: &str, token_type: TokenType, priority: i32) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| HiliteError::InvalidPattern {
            rule: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            token_type,
            priority,
            group: None,
        })
    }

    /// Builder: highlight only the given capture group
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }

    /// Find the first non-empty match at or after `start`
    ///
    /// With a capture group set, the match itself may begin before `start`
    /// (its prefix acts like a lookbehind); only the group has to lie at or
    /// after `start`.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }

        if let Some(group) = self.group {
            return self
                .pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(group))
                .map(|g| (g.start(), g.end()))
                .find(|&(s, e)| s >= start && e > s);
        }

        let mut from = start;
        while from < text.len() {
            let m = self.pattern.find_at(text, from)?;
            if m.end() > m.start() {
                return Some((m.start(), m.end()));
            }
            from = next_char_boundary(text, m.start());
        }
        None
    }

    /// Non-empty spans of the capture group over the whole text, in order
    ///
    /// Empty when no group is set.
    pub fn group_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let Some(group) = self.group else {
            return Vec::new();
        };
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(group))
            .map(|g| (g.start(), g.end()))
            .filter(|&(s, e)| e > s)
            .collect()
    }
}

/// A delimited construct rule (block comments, strings)
///
/// Starts at a match of `start` and runs to the first unescaped match of
/// `end`. An unterminated construct runs to the end of the text.
#[derive(Debug, Clone)]
pub struct DelimitedRule {
    /// Name for debugging
    pub name: String,
    /// Pattern that starts the construct
    pub start: Regex,
    /// Pattern that ends the construct
    pub end: Regex,
    /// Token type for this construct
    pub token_type: TokenType,
    /// Escape character (usually backslash)
    pub escape_char: Option<char>,
}

impl DelimitedRule {
    /// Create a new delimited rule, `None` if either regex does not compile
    pub fn new(name: &str, start_pattern: &str, end_pattern: &str, token_type: TokenType) -> Option<Self> {
        Self::try_new(name, start_pattern, end_pattern, token_type, None).ok()
    }

    /// Create a delimited rule with escape support
    pub fn with_escape(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        token_type: TokenType,
        escape_char: char,
    ) -> Option<Self> {
        Self::try_new(name, start_pattern, end_pattern, token_type, Some(escape_char)).ok()
    }

    /// Create a delimited rule, reporting regex errors
    pub fn try_new(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        token_type: TokenType,
        escape_char: Option<char>,
    ) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| HiliteError::InvalidPattern {
                rule: name.to_string(),
                source,
            })
        };
        Ok(Self {
            name: name.to_string(),
            start: compile(start_pattern)?,
            end: compile(end_pattern)?,
            token_type,
            escape_char,
        })
    }

    /// Find start of this construct at or after `from`
    pub fn find_start(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut pos = from;
        while pos < text.len() {
            let m = self.start.find_at(text, pos)?;
            if m.end() > m.start() {
                return Some((m.start(), m.end()));
            }
            pos = next_char_boundary(text, m.start());
        }
        None
    }

    /// Find end of this construct searching from `from`, respecting escapes
    pub fn find_end(&self, text: &str, from: usize) -> Option<usize> {
        let mut pos = from;
        while pos <= text.len() {
            let m = self.end.find_at(text, pos)?;
            if m.end() == m.start() {
                pos = next_char_boundary(text, m.start());
                continue;
            }

            if let Some(escape) = self.escape_char {
                let escape_count = text[from..m.start()]
                    .chars()
                    .rev()
                    .take_while(|&c| c == escape)
                    .count();
                if escape_count % 2 == 1 {
                    // Odd number of escapes = escaped
                    pos = m.end();
                    continue;
                }
            }
            return Some(m.end());
        }
        None
    }

    /// Byte range covered by a construct starting at `start..open_end`
    pub fn extent(&self, text: &str, open_end: usize) -> usize {
        self.find_end(text, open_end).unwrap_or(text.len())
    }
}

/// Smallest char boundary strictly after `pos` (or `text.len() + 1` past the end)
fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}
