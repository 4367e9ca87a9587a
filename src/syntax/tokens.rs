//! Token types and tokenizer output
//!
//! This module defines the semantic token types a grammar can assign,
//! their class names and default visual styles, and the `Token` unit a
//! tokenizer emits.

use super::style::{Color, Style};

/// Semantic token types for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Source code comments
    Comment,
    /// String literals
    String,
    /// Character literals
    Char,
    /// Numeric literals (integers, floats)
    Number,
    /// `true`, `false` and friends
    Boolean,
    /// Language keywords (if, else, let, def, etc.)
    Keyword,
    /// Built-in functions and objects
    Builtin,
    /// Class and type names
    ClassName,
    /// Function names at call or definition sites
    Function,
    /// Operators (+, -, *, /, etc.)
    Operator,
    /// Punctuation (, ; : etc.)
    Punctuation,
    /// Regular expression literals
    Regex,
    /// Object keys and CSS properties
    Property,
    /// CSS selectors
    Selector,
    /// CSS at-rules (@media, @import)
    Atrule,
    /// Constants (ALL_CAPS names, null, undefined)
    Constant,
    /// Variables ($var, --custom-prop)
    Variable,
    /// `!important` and similar markers
    Important,
    /// Decorators and annotations (@decorator)
    Decorator,
    /// Markdown headings
    Title,
    /// Markdown strong emphasis
    Bold,
    /// Markdown emphasis
    Italic,
    /// Links and URLs
    Url,
    /// Inline code and fenced code blocks
    Code,
    /// Markdown block quotes
    Blockquote,
    /// Horizontal rules
    Hr,
    /// List markers
    List,
    /// Strikethrough text
    Strike,
}

impl TokenType {
    /// Every token type, in declaration order
    pub const ALL: [TokenType; 28] = [
        TokenType::Comment,
        TokenType::String,
        TokenType::Char,
        TokenType::Number,
        TokenType::Boolean,
        TokenType::Keyword,
        TokenType::Builtin,
        TokenType::ClassName,
        TokenType::Function,
        TokenType::Operator,
        TokenType::Punctuation,
        TokenType::Regex,
        TokenType::Property,
        TokenType::Selector,
        TokenType::Atrule,
        TokenType::Constant,
        TokenType::Variable,
        TokenType::Important,
        TokenType::Decorator,
        TokenType::Title,
        TokenType::Bold,
        TokenType::Italic,
        TokenType::Url,
        TokenType::Code,
        TokenType::Blockquote,
        TokenType::Hr,
        TokenType::List,
        TokenType::Strike,
    ];

    /// Get the default style for this token type
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenType::String => Style::fg(Color::Green),
            TokenType::Char => Style::fg(Color::Green),
            TokenType::Number => Style::fg(Color::Cyan),
            TokenType::Boolean => Style::fg(Color::Cyan),
            TokenType::Keyword => Style::fg(Color::Magenta).with_bold(),
            TokenType::Builtin => Style::fg(Color::BrightCyan),
            TokenType::ClassName => Style::fg(Color::Yellow),
            TokenType::Function => Style::fg(Color::Blue),
            TokenType::Operator => Style::fg(Color::BrightWhite),
            TokenType::Punctuation => Style::default(),
            TokenType::Regex => Style::fg(Color::BrightYellow),
            TokenType::Property => Style::fg(Color::BrightBlue),
            TokenType::Selector => Style::fg(Color::Yellow),
            TokenType::Atrule => Style::fg(Color::BrightMagenta),
            TokenType::Constant => Style::fg(Color::BrightRed),
            TokenType::Variable => Style::fg(Color::BrightRed),
            TokenType::Important => Style::fg(Color::Red).with_bold(),
            TokenType::Decorator => Style::fg(Color::BrightBlue),
            TokenType::Title => Style::fg(Color::Magenta).with_bold(),
            TokenType::Bold => Style::default().with_bold(),
            TokenType::Italic => Style::default().with_italic(),
            TokenType::Url => Style::fg(Color::Blue).with_underline(),
            TokenType::Code => Style::fg(Color::Green),
            TokenType::Blockquote => Style::fg(Color::BrightBlack),
            TokenType::Hr => Style::fg(Color::BrightBlack),
            TokenType::List => Style::fg(Color::Yellow),
            TokenType::Strike => Style::fg(Color::BrightBlack),
        }
    }

    /// Class name used in `token <type>` style classes
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Comment => "comment",
            TokenType::String => "string",
            TokenType::Char => "char",
            TokenType::Number => "number",
            TokenType::Boolean => "boolean",
            TokenType::Keyword => "keyword",
            TokenType::Builtin => "builtin",
            TokenType::ClassName => "class-name",
            TokenType::Function => "function",
            TokenType::Operator => "operator",
            TokenType::Punctuation => "punctuation",
            TokenType::Regex => "regex",
            TokenType::Property => "property",
            TokenType::Selector => "selector",
            TokenType::Atrule => "atrule",
            TokenType::Constant => "constant",
            TokenType::Variable => "variable",
            TokenType::Important => "important",
            TokenType::Decorator => "decorator",
            TokenType::Title => "title",
            TokenType::Bold => "bold",
            TokenType::Italic => "italic",
            TokenType::Url => "url",
            TokenType::Code => "code",
            TokenType::Blockquote => "blockquote",
            TokenType::Hr => "hr",
            TokenType::List => "list",
            TokenType::Strike => "strike",
        }
    }

    /// Parse a token type from its class name (for TOML loading)
    ///
    /// Accepts `class-name` as well as `class_name`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Full style class emitted on range annotations
    pub fn class_name(&self) -> String {
        format!("token {}", self.name())
    }
}

/// One unit of tokenizer output
///
/// A tokenizer covers its input exactly: concatenating `text()` of every
/// token in order reproduces the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Unclassified text, never styled
    Plain(&'a str),
    /// Classified text
    Typed { kind: TokenType, content: &'a str },
}

impl<'a> Token<'a> {
    /// The covered text
    pub fn text(&self) -> &'a str {
        match self {
            Token::Plain(text) => text,
            Token::Typed { content, .. } => content,
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text().len()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Token type, `None` for plain text
    pub fn kind(&self) -> Option<TokenType> {
        match self {
            Token::Plain(_) => None,
            Token::Typed { kind, .. } => Some(*kind),
        }
    }
}

/// Anything that can split text into tokens
///
/// The decorator only depends on this seam, so tests can inject a counting
/// or canned tokenizer.
pub trait Tokenizer {
    /// Split `text` into an ordered sequence of tokens covering it exactly
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>>;

    /// Name of the grammar, for logging
    fn name(&self) -> &str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        (**self).tokenize(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for std::rc::Rc<T> {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        (**self).tokenize(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_not_empty() {
        // Most token types should have non-default styling
        assert!(!TokenType::Comment.default_style().is_default());
        assert!(!TokenType::String.default_style().is_default());
        assert!(!TokenType::Keyword.default_style().is_default());
        // Punctuation stays plain
        assert!(TokenType::Punctuation.default_style().is_default());
    }

    #[test]
    fn test_from_name_roundtrip() {
        for token_type in TokenType::ALL {
            assert_eq!(TokenType::from_name(token_type.name()), Some(token_type));
        }
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(TokenType::from_name("class_name"), Some(TokenType::ClassName));
        assert_eq!(TokenType::from_name("Keyword"), Some(TokenType::Keyword));
        assert_eq!(TokenType::from_name("InvalidType"), None);
        assert_eq!(TokenType::from_name(""), None);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(TokenType::Keyword.class_name(), "token keyword");
        assert_eq!(TokenType::ClassName.class_name(), "token class-name");
    }

    #[test]
    fn test_token_accessors() {
        let plain = Token::Plain(" = ");
        let typed = Token::Typed { kind: TokenType::Number, content: "42" };
        assert_eq!(plain.len(), 3);
        assert_eq!(plain.kind(), None);
        assert_eq!(typed.text(), "42");
        assert_eq!(typed.kind(), Some(TokenType::Number));
    }
}
