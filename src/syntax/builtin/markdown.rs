//! Markdown grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::{DelimitedRule, PatternRule};
use crate::syntax::tokens::TokenType;

/// Create Markdown grammar
pub fn markdown_grammar() -> Grammar {
    let mut grammar = Grammar::new("markdown");
    grammar.add_alias("md");
    grammar.add_extension("md");
    grammar.add_extension("markdown");
    grammar.add_extension("mkd");

    // Fenced code; a fence line without a closing fence is all code
    if let Some(rule) = DelimitedRule::new("code_fence", r"^\s*(?:```|~~~)", r"```|~~~", TokenType::Code) {
        grammar.add_delimited(rule);
    }

    // Headers
    if let Some(rule) = PatternRule::new("header", r"^#{1,6}\s.*$", TokenType::Title, 100) {
        grammar.add_pattern(rule);
    }

    // Horizontal rules
    if let Some(rule) = PatternRule::new("hr", r"^(?:---+|\*\*\*+|___+)\s*$", TokenType::Hr, 98) {
        grammar.add_pattern(rule);
    }

    // Blockquotes
    if let Some(rule) = PatternRule::new("blockquote", r"^\s*>.*$", TokenType::Blockquote, 96) {
        grammar.add_pattern(rule);
    }

    // Bold (** or __)
    if let Some(rule) = PatternRule::new("bold", r"\*\*[^*]+\*\*", TokenType::Bold, 90) {
        grammar.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("bold2", r"\b__[^_]+__\b", TokenType::Bold, 90) {
        grammar.add_pattern(rule);
    }

    // Inline code
    if let Some(rule) = PatternRule::new("inline_code", r"`[^`]+`", TokenType::Code, 88) {
        grammar.add_pattern(rule);
    }

    // List items, ahead of italic so "* item *" is a list
    if let Some(rule) = PatternRule::new("list", r"^\s*(?:[-*+]|\d+\.)\s", TokenType::List, 87) {
        grammar.add_pattern(rule);
    }

    // Italic (* or _)
    if let Some(rule) = PatternRule::new("italic", r"\*[^*\s][^*]*\*", TokenType::Italic, 85) {
        grammar.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("italic2", r"\b_[^_]+_\b", TokenType::Italic, 85) {
        grammar.add_pattern(rule);
    }

    // Images ![alt](url)
    if let Some(rule) = PatternRule::new("image", r"!\[[^\]]*\]\([^)]+\)", TokenType::Url, 82) {
        grammar.add_pattern(rule);
    }

    // Links [text](url) and reference links [text][ref]
    if let Some(rule) = PatternRule::new("link", r"\[[^\]]+\]\([^)]+\)", TokenType::Url, 80) {
        grammar.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("ref_link", r"\[[^\]]+\]\[[^\]]*\]", TokenType::Url, 79) {
        grammar.add_pattern(rule);
    }

    // Bare URLs
    if let Some(rule) = PatternRule::new("autolink", r"<?https?://[^\s>]+>?", TokenType::Url, 78) {
        grammar.add_pattern(rule);
    }

    // Strikethrough
    if let Some(rule) = PatternRule::new("strikethrough", r"~~[^~]+~~", TokenType::Strike, 60) {
        grammar.add_pattern(rule);
    }

    grammar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Vec<(TokenType, String)> {
        markdown_grammar()
            .tokenize(text)
            .iter()
            .filter_map(|t| t.kind().map(|k| (k, t.text().to_string())))
            .collect()
    }

    #[test]
    fn test_markdown_header() {
        assert_eq!(typed("## Install"), vec![(TokenType::Title, "## Install".to_string())]);
        // Not a header without the space
        assert!(typed("#hashtag").is_empty());
    }

    #[test]
    fn test_markdown_inline() {
        let spans = typed("Use **bold**, *em* and `code`.");
        assert_eq!(
            spans,
            vec![
                (TokenType::Bold, "**bold**".to_string()),
                (TokenType::Italic, "*em*".to_string()),
                (TokenType::Code, "`code`".to_string()),
            ]
        );
    }

    #[test]
    fn test_markdown_list_and_link() {
        let spans = typed("* see [docs](https://example.com)");
        assert_eq!(spans[0], (TokenType::List, "* ".to_string()));
        assert_eq!(spans[1], (TokenType::Url, "[docs](https://example.com)".to_string()));
    }

    #[test]
    fn test_markdown_fence_line() {
        assert_eq!(typed("```rust"), vec![(TokenType::Code, "```rust".to_string())]);
        assert_eq!(typed("---"), vec![(TokenType::Hr, "---".to_string())]);
    }
}
