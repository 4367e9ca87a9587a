//! Style types for text rendering
//!
//! Styles are what a theme resolves a token class name to; the renderer
//! turns them into terminal attributes.

use crate::error::{HiliteError, Result};

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color name such as `"bright-blue"` or `"BrightBlue"`
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        let color = match normalized.as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "brightblack" | "gray" | "grey" => Color::BrightBlack,
            "brightred" => Color::BrightRed,
            "brightgreen" => Color::BrightGreen,
            "brightyellow" => Color::BrightYellow,
            "brightblue" => Color::BrightBlue,
            "brightmagenta" => Color::BrightMagenta,
            "brightcyan" => Color::BrightCyan,
            "brightwhite" => Color::BrightWhite,
            _ => return Err(HiliteError::UnknownColor(name.to_string())),
        };
        Ok(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a style spec like `"magenta bold"` or `"green on black italic"`
    pub fn parse(spec: &str) -> Result<Self> {
        let mut style = Style::default();
        let mut words = spec.split_whitespace();
        let mut fg_set = false;

        while let Some(word) = words.next() {
            match word.to_lowercase().as_str() {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "on" => {
                    let bg = words
                        .next()
                        .ok_or_else(|| HiliteError::UnknownColor(spec.to_string()))?;
                    style.bg = Color::from_name(bg)?;
                }
                _ if !fg_set => {
                    style.fg = Color::from_name(word)?;
                    fg_set = true;
                }
                _ => return Err(HiliteError::UnknownColor(word.to_string())),
            }
        }

        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_bg(Color::Blue);
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Blue);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_color_names() {
        assert_eq!(Color::from_name("bright-blue").unwrap(), Color::BrightBlue);
        assert_eq!(Color::from_name("BrightBlue").unwrap(), Color::BrightBlue);
        assert_eq!(Color::from_name("grey").unwrap(), Color::BrightBlack);
        assert!(Color::from_name("chartreuse").is_err());
    }

    #[test]
    fn test_parse_style_spec() {
        let style = Style::parse("magenta bold").unwrap();
        assert_eq!(style, Style::fg(Color::Magenta).with_bold());

        let style = Style::parse("green on black italic").unwrap();
        assert_eq!(style.fg, Color::Green);
        assert_eq!(style.bg, Color::Black);
        assert!(style.italic);

        assert!(Style::parse("red blue").is_err());
        assert!(Style::parse("red on").is_err());
        assert!(Style::parse("").unwrap().is_default());
    }
}
