//! JavaScript grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::{DelimitedRule, PatternRule};
use crate::syntax::tokens::TokenType;

/// Create JavaScript grammar
pub fn javascript_grammar() -> Grammar {
    let mut grammar = Grammar::new("javascript");
    grammar.add_alias("js");
    grammar.add_extension("js");
    grammar.add_extension("mjs");
    grammar.add_extension("cjs");
    grammar.add_extension("jsx");

    // Delimited rules, tried before patterns on ties
    if let Some(rule) = DelimitedRule::new("block_comment", r"/\*", r"\*/", TokenType::Comment) {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::with_escape("template_string", "`", "`", TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::with_escape("double_string", "\"", "\"", TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::with_escape("single_string", "'", "'", TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }

    // Line comments (highest priority)
    if let Some(rule) = PatternRule::new("line_comment", r"//.*", TokenType::Comment, 100) {
        grammar.add_pattern(rule);
    }

    // Regex literals, only where an expression can start
    if let Some(rule) = PatternRule::new(
        "regex",
        r"(?:^|[=(,:;!&|?{}\[]|\b(?:return|typeof|case|yield))\s*(/(?:[^/\\\s*]|\\.)(?:[^/\\\n]|\\.)*/[dgimsuy]*)",
        TokenType::Regex,
        95,
    ) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Booleans and constants
    if let Some(rule) = PatternRule::new("boolean", r"\b(?:true|false)\b", TokenType::Boolean, 85) {
        grammar.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("nullish", r"\b(?:null|undefined|NaN|Infinity)\b", TokenType::Constant, 85) {
        grammar.add_pattern(rule);
    }

    // Keywords
    let keywords = r"\b(?:as|async|await|break|case|catch|class|const|continue|debugger|default|delete|do|else|export|extends|finally|for|from|function|get|if|implements|import|in|instanceof|interface|let|new|of|package|private|protected|public|return|set|static|super|switch|this|throw|try|typeof|var|void|while|with|yield)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, TokenType::Keyword, 80) {
        grammar.add_pattern(rule);
    }

    // Class names after class/extends/new
    if let Some(rule) = PatternRule::new(
        "class_name",
        r"\b(?:class|extends|implements|instanceof|new)\s+([A-Za-z_$][\w$]*)",
        TokenType::ClassName,
        75,
    ) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Function definitions and calls
    if let Some(rule) = PatternRule::new(
        "function_def",
        r"\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)",
        TokenType::Function,
        72,
    ) {
        grammar.add_pattern(rule.with_group(1));
    }
    if let Some(rule) = PatternRule::new("function_call", r"([A-Za-z_$][\w$]*)\s*\(", TokenType::Function, 70) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Builtin globals
    let builtins = r"\b(?:Array|Boolean|Date|Error|JSON|Map|Math|Number|Object|Promise|Proxy|Reflect|RegExp|Set|String|Symbol|WeakMap|WeakSet|console|document|globalThis|window)\b";
    if let Some(rule) = PatternRule::new("builtin", builtins, TokenType::Builtin, 68) {
        grammar.add_pattern(rule);
    }

    // Numbers
    // Hex, binary, octal (with optional BigInt suffix)
    if let Some(rule) = PatternRule::new("radix", r"\b0(?:[xX][\da-fA-F_]+|[bB][01_]+|[oO][0-7_]+)n?\b", TokenType::Number, 65) {
        grammar.add_pattern(rule);
    }
    // Float
    if let Some(rule) = PatternRule::new("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?\b", TokenType::Number, 64) {
        grammar.add_pattern(rule);
    }
    // Integer
    if let Some(rule) = PatternRule::new("integer", r"\b\d[\d_]*(?:[eE][+-]?\d+)?n?\b", TokenType::Number, 63) {
        grammar.add_pattern(rule);
    }

    // Constants (ALL_CAPS)
    if let Some(rule) = PatternRule::new("constant", r"\b[A-Z][A-Z\d_]+\b", TokenType::Constant, 55) {
        grammar.add_pattern(rule);
    }

    // Operators
    if let Some(rule) = PatternRule::new("operator", r"[-+*/%&|^!=<>?~]+", TokenType::Operator, 40) {
        grammar.add_pattern(rule);
    }

    // Punctuation
    if let Some(rule) = PatternRule::new("punctuation", r"\.\.\.|[{}\[\];(),.:]", TokenType::Punctuation, 30) {
        grammar.add_pattern(rule);
    }

    grammar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::Token;
    use std::time::{Duration, Instant};

    fn typed(text: &str) -> Vec<(TokenType, String)> {
        javascript_grammar()
            .tokenize(text)
            .iter()
            .filter_map(|t| t.kind().map(|k| (k, t.text().to_string())))
            .collect()
    }

    #[test]
    fn test_let_statement() {
        let grammar = javascript_grammar();
        let tokens = grammar.tokenize("let x = 1;");
        assert_eq!(tokens[0], Token::Typed { kind: TokenType::Keyword, content: "let" });
        assert!(tokens.contains(&Token::Typed { kind: TokenType::Number, content: "1" }));
        assert!(tokens.contains(&Token::Typed { kind: TokenType::Operator, content: "=" }));
        assert!(tokens.contains(&Token::Typed { kind: TokenType::Punctuation, content: ";" }));
        assert!(tokens.contains(&Token::Plain(" x ")));
    }

    #[test]
    fn test_js_comment_and_string() {
        assert_eq!(typed("// let x = 1"), vec![(TokenType::Comment, "// let x = 1".to_string())]);

        let spans = typed(r#"s = "it's // fine";"#);
        assert!(spans.contains(&(TokenType::String, r#""it's // fine""#.to_string())));
        assert!(!spans.iter().any(|(k, _)| *k == TokenType::Comment));
    }

    #[test]
    fn test_js_function_and_class() {
        let spans = typed("function greet(name) { return new Person(name); }");
        assert!(spans.contains(&(TokenType::Keyword, "function".to_string())));
        assert!(spans.contains(&(TokenType::Function, "greet".to_string())));
        assert!(spans.contains(&(TokenType::ClassName, "Person".to_string())));
        assert!(spans.contains(&(TokenType::Keyword, "return".to_string())));
    }

    #[test]
    fn test_js_call_vs_keyword() {
        let spans = typed("if (ready) start();");
        assert_eq!(spans[0], (TokenType::Keyword, "if".to_string()));
        assert!(spans.contains(&(TokenType::Function, "start".to_string())));
    }

    #[test]
    fn test_js_regex_vs_division() {
        let spans = typed("const re = /ab+c/gi;");
        assert!(spans.contains(&(TokenType::Regex, "/ab+c/gi".to_string())));

        let spans = typed("half = total / 2 / 1;");
        assert!(!spans.iter().any(|(k, _)| *k == TokenType::Regex));
    }

    #[test]
    fn test_long_line_scans_quickly() {
        let text = "a(b);".repeat(2000);
        let started = Instant::now();
        let tokens = javascript_grammar().tokenize(&text);
        let elapsed = started.elapsed();

        let calls = tokens.iter().filter(|t| t.kind() == Some(TokenType::Function)).count();
        assert_eq!(calls, 2000);
        let joined: String = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(joined, text);
        assert!(elapsed < Duration::from_secs(2), "10 KB line took {:?}", elapsed);
    }
}
