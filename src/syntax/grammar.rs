//! Grammars for syntax highlighting
//!
//! A `Grammar` combines pattern rules and delimited rules for one
//! language and tokenizes text with them.

use super::rules::{DelimitedRule, PatternRule};
use super::tokens::{Token, TokenType, Tokenizer};

/// A complete grammar for one language
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Grammar name (e.g., "javascript", "python")
    pub name: String,
    /// Alternative names (e.g., ["js"])
    pub aliases: Vec<String>,
    /// File extensions (e.g., ["js", "mjs"])
    pub extensions: Vec<String>,
    /// Single-line pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
    /// Delimited rules for comments, strings, etc.
    pub delimited: Vec<DelimitedRule>,
}

/// A match candidate found while scanning
struct Candidate {
    start: usize,
    end: usize,
    kind: TokenType,
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            patterns: Vec::new(),
            delimited: Vec::new(),
        }
    }

    /// Add an alternative name
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a pattern rule
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
        // Keep sorted by priority (highest first); stable for equal priorities
        self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a delimited rule
    pub fn add_delimited(&mut self, rule: DelimitedRule) {
        self.delimited.push(rule);
    }

    /// Tokenize one piece of text
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut scanner = Scanner::new(self, text);
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            match scanner.next_candidate(pos) {
                Some(candidate) => {
                    if candidate.start > pos {
                        tokens.push(Token::Plain(&text[pos..candidate.start]));
                    }
                    tokens.push(Token::Typed {
                        kind: candidate.kind,
                        content: &text[candidate.start..candidate.end],
                    });
                    pos = candidate.end;
                }
                None => {
                    tokens.push(Token::Plain(&text[pos..]));
                    pos = text.len();
                }
            }
        }

        tokens
    }
}

/// Next match of one rule, remembered between scan steps
///
/// A match found from an earlier position stays the first match at or
/// after any later position up to its start, so it is only searched
/// again once the scan has moved past it.
#[derive(Debug, Clone, Copy)]
enum Lookahead {
    Unknown,
    Found(usize, usize),
    Exhausted,
}

impl Lookahead {
    fn next(&mut self, pos: usize, search: impl FnOnce() -> Option<(usize, usize)>) -> Option<(usize, usize)> {
        match *self {
            Lookahead::Found(start, end) if start >= pos => return Some((start, end)),
            Lookahead::Exhausted => return None,
            _ => {}
        }
        let found = search();
        *self = found.map_or(Lookahead::Exhausted, |(start, end)| Lookahead::Found(start, end));
        found
    }
}

/// Per-pattern scan state
enum PatternState {
    /// Plain pattern, searched from the current position
    Search(Lookahead),
    /// Group pattern: all group spans, computed once, and a cursor into them
    Groups { spans: Vec<(usize, usize)>, next: usize },
}

/// Scan state for one `tokenize` call
struct Scanner<'g, 't> {
    grammar: &'g Grammar,
    text: &'t str,
    delimited: Vec<Lookahead>,
    patterns: Vec<PatternState>,
}

impl<'g, 't> Scanner<'g, 't> {
    fn new(grammar: &'g Grammar, text: &'t str) -> Self {
        let patterns = grammar
            .patterns
            .iter()
            .map(|rule| match rule.group {
                Some(_) => PatternState::Groups { spans: rule.group_spans(text), next: 0 },
                None => PatternState::Search(Lookahead::Unknown),
            })
            .collect();

        Self {
            grammar,
            text,
            delimited: vec![Lookahead::Unknown; grammar.delimited.len()],
            patterns,
        }
    }

    /// Earliest match at or after `pos` over all rules
    ///
    /// Ties go to delimited rules in declaration order, then to pattern
    /// rules by priority.
    fn next_candidate(&mut self, pos: usize) -> Option<Candidate> {
        let (grammar, text) = (self.grammar, self.text);
        let mut best: Option<Candidate> = None;

        for (rule, lookahead) in grammar.delimited.iter().zip(&mut self.delimited) {
            let found = lookahead.next(pos, || {
                let (start, open_end) = rule.find_start(text, pos)?;
                Some((start, rule.extent(text, open_end)))
            });
            if let Some((start, end)) = found {
                if best.as_ref().map_or(true, |b| start < b.start) {
                    best = Some(Candidate { start, end, kind: rule.token_type });
                }
            }
        }

        for (rule, state) in grammar.patterns.iter().zip(&mut self.patterns) {
            let found = match state {
                PatternState::Search(lookahead) => lookahead.next(pos, || rule.find_at(text, pos)),
                PatternState::Groups { spans, next } => {
                    while *next < spans.len() && spans[*next].0 < pos {
                        *next += 1;
                    }
                    spans.get(*next).copied()
                }
            };
            if let Some((start, end)) = found {
                if best.as_ref().map_or(true, |b| start < b.start) {
                    best = Some(Candidate { start, end, kind: rule.token_type });
                }
            }
            if best.as_ref().is_some_and(|b| b.start == pos) {
                // Nothing can start earlier than the current position
                break;
            }
        }

        best
    }
}

impl Tokenizer for Grammar {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        Grammar::tokenize(self, text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
