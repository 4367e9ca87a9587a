//! CSS grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::{DelimitedRule, PatternRule};
use crate::syntax::tokens::TokenType;

/// Create CSS grammar
pub fn css_grammar() -> Grammar {
    let mut grammar = Grammar::new("css");
    grammar.add_extension("css");

    if let Some(rule) = DelimitedRule::new("comment", r"/\*", r"\*/", TokenType::Comment) {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::with_escape("double_string", "\"", "\"", TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::with_escape("single_string", "'", "'", TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }

    // At-rules
    if let Some(rule) = PatternRule::new("atrule", r"@[\w-]+", TokenType::Atrule, 95) {
        grammar.add_pattern(rule);
    }

    // url(...) with an unquoted argument
    if let Some(rule) = PatternRule::new("url", r#"\burl\([^)"']*\)"#, TokenType::Url, 92) {
        grammar.add_pattern(rule);
    }

    // !important
    if let Some(rule) = PatternRule::new("important", r"!\s*important\b", TokenType::Important, 90) {
        grammar.add_pattern(rule);
    }

    // Selectors: everything up to an opening brace
    if let Some(rule) = PatternRule::new("selector", r"([^{}\s;][^{};]*?)\s*\{", TokenType::Selector, 80) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Properties, including custom properties
    if let Some(rule) = PatternRule::new("property", r"(?:^|[{;])\s*(--?[A-Za-z][\w-]*)\s*:", TokenType::Property, 75) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Functions
    if let Some(rule) = PatternRule::new("function", r"\b([A-Za-z][\w-]*)\(", TokenType::Function, 70) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Custom property references
    if let Some(rule) = PatternRule::new("variable", r"--[A-Za-z][\w-]*", TokenType::Variable, 65) {
        grammar.add_pattern(rule);
    }

    // Hex colors
    if let Some(rule) = PatternRule::new("hexcode", r"#[\da-fA-F]{3,8}\b", TokenType::Constant, 60) {
        grammar.add_pattern(rule);
    }

    // Numbers with optional unit
    if let Some(rule) = PatternRule::new("number", r"\b\d+(?:\.\d+)?(?:%|[A-Za-z]+)?|\B\.\d+(?:%|[A-Za-z]+)?", TokenType::Number, 55) {
        grammar.add_pattern(rule);
    }

    // Punctuation
    if let Some(rule) = PatternRule::new("punctuation", r"[{}();:,]", TokenType::Punctuation, 30) {
        grammar.add_pattern(rule);
    }

    grammar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Vec<(TokenType, String)> {
        css_grammar()
            .tokenize(text)
            .iter()
            .filter_map(|t| t.kind().map(|k| (k, t.text().to_string())))
            .collect()
    }

    #[test]
    fn test_css_rule_line() {
        let spans = typed("a:hover { color: #ff0000 !important; }");
        assert_eq!(spans[0], (TokenType::Selector, "a:hover".to_string()));
        assert!(spans.contains(&(TokenType::Property, "color".to_string())));
        assert!(spans.contains(&(TokenType::Constant, "#ff0000".to_string())));
        assert!(spans.contains(&(TokenType::Important, "!important".to_string())));
    }

    #[test]
    fn test_css_declaration_line() {
        let spans = typed("  margin: 0 auto 1.5em;");
        assert_eq!(spans[0], (TokenType::Property, "margin".to_string()));
        assert!(spans.contains(&(TokenType::Number, "0".to_string())));
        assert!(spans.contains(&(TokenType::Number, "1.5em".to_string())));
    }

    #[test]
    fn test_css_at_rule_and_var() {
        let spans = typed("@media (max-width: 600px) {");
        assert_eq!(spans[0], (TokenType::Atrule, "@media".to_string()));
        assert!(spans.contains(&(TokenType::Number, "600px".to_string())));

        let spans = typed("width: var(--gutter);");
        assert!(spans.contains(&(TokenType::Function, "var".to_string())));
        assert!(spans.contains(&(TokenType::Variable, "--gutter".to_string())));
    }
}
