//! Python grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::{DelimitedRule, PatternRule};
use crate::syntax::tokens::TokenType;

/// Create Python grammar
pub fn python_grammar() -> Grammar {
    let mut grammar = Grammar::new("python");
    grammar.add_alias("py");
    grammar.add_extension("py");
    grammar.add_extension("pyw");
    grammar.add_extension("pyi");

    // Triple-quoted strings (docstrings) before plain quotes so they win ties
    let prefix = r"(?:\b[rRbBfFuU]{1,2})?";
    if let Some(rule) = DelimitedRule::new("triple_double", &format!(r#"{prefix}""""#), r#"""""#, TokenType::String) {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::new("triple_single", &format!(r"{prefix}'''"), r"'''", TokenType::String) {
        grammar.add_delimited(rule);
    }

    // Regular strings (with escape support)
    if let Some(rule) = DelimitedRule::with_escape("double_string", &format!(r#"{prefix}""#), r#"""#, TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }
    if let Some(rule) = DelimitedRule::with_escape("single_string", &format!(r"{prefix}'"), r"'", TokenType::String, '\\') {
        grammar.add_delimited(rule);
    }

    // Comments
    if let Some(rule) = PatternRule::new("comment", r"#.*", TokenType::Comment, 100) {
        grammar.add_pattern(rule);
    }

    // Decorators
    if let Some(rule) = PatternRule::new("decorator", r"^\s*(@[\w.]+)", TokenType::Decorator, 95) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Booleans
    if let Some(rule) = PatternRule::new("boolean", r"\b(?:True|False)\b", TokenType::Boolean, 85) {
        grammar.add_pattern(rule);
    }

    // Keywords
    let keywords = r"\b(?:None|and|as|assert|async|await|break|case|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|match|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, TokenType::Keyword, 80) {
        grammar.add_pattern(rule);
    }

    // Definitions
    if let Some(rule) = PatternRule::new("def_name", r"\bdef\s+(\w+)", TokenType::Function, 78) {
        grammar.add_pattern(rule.with_group(1));
    }
    if let Some(rule) = PatternRule::new("class_name", r"\bclass\s+(\w+)", TokenType::ClassName, 78) {
        grammar.add_pattern(rule.with_group(1));
    }

    // self/cls
    if let Some(rule) = PatternRule::new("self", r"\b(?:self|cls)\b", TokenType::Variable, 77) {
        grammar.add_pattern(rule);
    }

    // Built-in functions
    let builtins = r"\b(?:abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b";
    if let Some(rule) = PatternRule::new("builtin", builtins, TokenType::Builtin, 75) {
        grammar.add_pattern(rule);
    }

    // Function calls
    if let Some(rule) = PatternRule::new("call", r"\b([A-Za-z_]\w*)\s*\(", TokenType::Function, 70) {
        grammar.add_pattern(rule.with_group(1));
    }

    // Numbers
    // Hex
    if let Some(rule) = PatternRule::new("hex", r"\b0[xX][0-9a-fA-F_]+\b", TokenType::Number, 65) {
        grammar.add_pattern(rule);
    }
    // Binary
    if let Some(rule) = PatternRule::new("binary", r"\b0[bB][01_]+\b", TokenType::Number, 65) {
        grammar.add_pattern(rule);
    }
    // Octal
    if let Some(rule) = PatternRule::new("octal", r"\b0[oO][0-7_]+\b", TokenType::Number, 65) {
        grammar.add_pattern(rule);
    }
    // Float
    if let Some(rule) = PatternRule::new("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b", TokenType::Number, 64) {
        grammar.add_pattern(rule);
    }
    // Integer
    if let Some(rule) = PatternRule::new("integer", r"\b\d[\d_]*j?\b", TokenType::Number, 63) {
        grammar.add_pattern(rule);
    }

    // Operators
    if let Some(rule) = PatternRule::new("operator", r"[-+*/%&|^!<>=@~]+", TokenType::Operator, 40) {
        grammar.add_pattern(rule);
    }

    // Punctuation
    if let Some(rule) = PatternRule::new("punctuation", r"[{}\[\];(),.:]", TokenType::Punctuation, 30) {
        grammar.add_pattern(rule);
    }

    grammar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Vec<(TokenType, String)> {
        python_grammar()
            .tokenize(text)
            .iter()
            .filter_map(|t| t.kind().map(|k| (k, t.text().to_string())))
            .collect()
    }

    #[test]
    fn test_python_def() {
        let spans = typed("def greet(self, name):");
        assert_eq!(spans[0], (TokenType::Keyword, "def".to_string()));
        assert_eq!(spans[1], (TokenType::Function, "greet".to_string()));
        assert!(spans.contains(&(TokenType::Variable, "self".to_string())));
    }

    #[test]
    fn test_python_strings() {
        let spans = typed(r#"msg = f"hi {name}" # greet"#);
        assert!(spans.contains(&(TokenType::String, r#"f"hi {name}""#.to_string())));
        assert!(spans.contains(&(TokenType::Comment, "# greet".to_string())));

        let spans = typed(r#"doc = """text""""#);
        assert!(spans.contains(&(TokenType::String, r#""""text""""#.to_string())));
    }

    #[test]
    fn test_python_decorator() {
        let spans = typed("    @property");
        assert_eq!(spans, vec![(TokenType::Decorator, "@property".to_string())]);

        // Matrix multiplication is an operator, not a decorator
        let spans = typed("c = a @ b");
        assert!(!spans.iter().any(|(k, _)| *k == TokenType::Decorator));
    }

    #[test]
    fn test_python_comment_in_string() {
        let spans = typed("s = '# not a comment'");
        assert!(!spans.iter().any(|(k, _)| *k == TokenType::Comment));
    }
}
