//! Themes - mapping style classes to terminal styles
//!
//! Range annotations only carry an opaque class string such as
//! `"token keyword"`. A theme resolves that string to a `Style`.

use std::collections::HashMap;

use crate::error::{HiliteError, Result};
use crate::syntax::{Color, Style, TokenType};

/// Names of the built-in themes
pub const THEME_NAMES: [&str; 2] = ["default", "funky"];

/// A named set of token styles
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    styles: HashMap<TokenType, Style>,
}

impl Theme {
    /// Theme using each token type's default style
    pub fn default_theme() -> Self {
        let styles = TokenType::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_style()))
            .collect();
        Self {
            name: "default".to_string(),
            styles,
        }
    }

    /// High-contrast theme after Prism's "funky"; unlisted types stay plain
    pub fn funky() -> Self {
        let mut theme = Self {
            name: "funky".to_string(),
            styles: HashMap::new(),
        };

        let dim = Style::fg(Color::BrightBlack);
        let cyan = Style::fg(Color::BrightCyan);
        let yellow = Style::fg(Color::Yellow);
        let green = Style::fg(Color::BrightGreen);
        let pink = Style::fg(Color::BrightMagenta);
        let orange = Style::fg(Color::BrightYellow);

        for (kind, style) in [
            (TokenType::Comment, dim),
            (TokenType::Blockquote, dim),
            (TokenType::Punctuation, dim),
            (TokenType::Property, cyan),
            (TokenType::Boolean, cyan),
            (TokenType::Number, cyan),
            (TokenType::Constant, cyan),
            (TokenType::Selector, yellow),
            (TokenType::String, yellow),
            (TokenType::Char, yellow),
            (TokenType::Builtin, yellow),
            (TokenType::Code, yellow),
            (TokenType::Operator, green),
            (TokenType::Url, green),
            (TokenType::Variable, green),
            (TokenType::Atrule, pink),
            (TokenType::Keyword, pink),
            (TokenType::Title, pink.with_bold()),
            (TokenType::Regex, orange),
            (TokenType::Important, orange.with_bold()),
            (TokenType::Bold, Style::default().with_bold()),
            (TokenType::Italic, Style::default().with_italic()),
            (TokenType::Strike, Style::fg(Color::Red)),
        ] {
            theme.set(kind, style);
        }

        theme
    }

    /// Built-in theme by name
    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "default" => Ok(Self::default_theme()),
            "funky" => Ok(Self::funky()),
            _ => Err(HiliteError::UnknownTheme(name.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the style of one token type
    pub fn set(&mut self, kind: TokenType, style: Style) {
        self.styles.insert(kind, style);
    }

    /// Style for a token type (plain if the theme does not list it)
    pub fn style(&self, kind: TokenType) -> Style {
        self.styles.get(&kind).copied().unwrap_or_default()
    }

    /// Style for a class string such as `"token keyword"`
    ///
    /// The first recognized token name wins; unknown classes are plain.
    pub fn style_for_class(&self, class_name: &str) -> Style {
        class_name
            .split_whitespace()
            .filter(|class| *class != "token")
            .find_map(TokenType::from_name)
            .map(|kind| self.style(kind))
            .unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
