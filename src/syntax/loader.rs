//! Loading grammars from TOML files
//!
//! Format:
//! ```toml
//! name = "sql"
//! aliases = ["psql"]
//! extensions = ["sql"]
//!
//! [[delimited]]
//! name = "string"
//! start = "'"
//! end = "'"
//! token = "string"
//! escape = "\\"
//!
//! [[pattern]]
//! name = "keyword"
//! regex = '(?i)\b(?:select|from|where)\b'
//! token = "keyword"
//! priority = 80
//! ```
//!
//! Unlike the built-in grammars, user grammars are validated: a bad regex
//! or an unknown token name is an error.

use std::fs;
use std::path::Path;

use toml::{Table, Value};

use super::grammar::Grammar;
use super::rules::{DelimitedRule, PatternRule};
use super::tokens::TokenType;
use crate::error::{HiliteError, Result};

/// Load a grammar from a TOML file
pub fn load_grammar_file(path: &Path) -> Result<Grammar> {
    let contents = fs::read_to_string(path)?;
    parse_grammar(&contents)
}

/// Parse a grammar from TOML text
pub fn parse_grammar(contents: &str) -> Result<Grammar> {
    let table: Table = contents.parse()?;

    let name = required_str(&table, "name", "grammar")?;
    let mut grammar = Grammar::new(name);

    for alias in string_list(&table, "aliases")? {
        grammar.add_alias(alias);
    }
    for ext in string_list(&table, "extensions")? {
        grammar.add_extension(ext);
    }

    for rule in tables(&table, "delimited")? {
        grammar.add_delimited(delimited_rule(rule)?);
    }
    for rule in tables(&table, "pattern")? {
        grammar.add_pattern(pattern_rule(rule)?);
    }

    Ok(grammar)
}

fn pattern_rule(table: &Table) -> Result<PatternRule> {
    let name = required_str(table, "name", "pattern")?;
    let regex = required_str(table, "regex", name)?;
    let token = token_type(table, name)?;
    let priority = optional_int(table, "priority", name)?.unwrap_or(50);

    let rule = PatternRule::try_new(name, regex, token, priority as i32)?;
    match optional_int(table, "group", name)? {
        Some(group) if group > 0 => {
            if group as usize >= rule.pattern.captures_len() {
                return Err(HiliteError::Message(format!(
                    "pattern '{}': no capture group {}",
                    name, group
                )));
            }
            Ok(rule.with_group(group as usize))
        }
        Some(group) if group < 0 => Err(HiliteError::Message(format!(
            "pattern '{}': invalid group {}",
            name, group
        ))),
        _ => Ok(rule),
    }
}

fn delimited_rule(table: &Table) -> Result<DelimitedRule> {
    let name = required_str(table, "name", "delimited")?;
    let start = required_str(table, "start", name)?;
    let end = required_str(table, "end", name)?;
    let token = token_type(table, name)?;

    let escape = match table.get("escape") {
        None => None,
        Some(Value::String(s)) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => {
                    return Err(HiliteError::Message(format!(
                        "delimited '{}': escape must be a single character",
                        name
                    )))
                }
            }
        }
        Some(_) => return Err(type_error(name, "escape", "a string")),
    };

    DelimitedRule::try_new(name, start, end, token, escape)
}

fn token_type(table: &Table, rule: &str) -> Result<TokenType> {
    let name = required_str(table, "token", rule)?;
    TokenType::from_name(name).ok_or_else(|| HiliteError::UnknownTokenType(name.to_string()))
}

fn required_str<'a>(table: &'a Table, key: &str, context: &str) -> Result<&'a str> {
    match table.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(type_error(context, key, "a string")),
        None => Err(HiliteError::Message(format!("{}: missing '{}'", context, key))),
    }
}

fn optional_int(table: &Table, key: &str, context: &str) -> Result<Option<i64>> {
    match table.get(key) {
        Some(Value::Integer(n)) => Ok(Some(*n)),
        Some(_) => Err(type_error(context, key, "an integer")),
        None => Ok(None),
    }
}

fn string_list<'a>(table: &'a Table, key: &str) -> Result<Vec<&'a str>> {
    match table.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| type_error("grammar", key, "a list of strings")))
            .collect(),
        Some(_) => Err(type_error("grammar", key, "a list of strings")),
    }
}

fn tables<'a>(table: &'a Table, key: &str) -> Result<Vec<&'a Table>> {
    match table.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_table().ok_or_else(|| type_error("grammar", key, "an array of tables")))
            .collect(),
        Some(_) => Err(type_error("grammar", key, "an array of tables")),
    }
}

fn type_error(context: &str, key: &str, expected: &str) -> HiliteError {
    HiliteError::Message(format!("{}: '{}' must be {}", context, key, expected))
}
