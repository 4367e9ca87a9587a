//! Configuration file support
//!
//! Loads settings from ~/.hilite.toml (or %USERPROFILE%\.hilite.toml on
//! Windows). `HILITE_CONFIG` points at a different file.
//!
//! Example:
//! ```toml
//! # hilite configuration
//! language = "python"
//! theme = "funky"
//! line-numbers = true
//! color = true
//! width = 100
//! grammars = ["~/.config/hilite/sql.toml"]
//!
//! [colors]
//! keyword = "magenta bold"
//! comment = "bright-black italic"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{HiliteError, Result};
use crate::syntax::{Style, TokenType};
use crate::theme::Theme;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Grammar to use when neither the command line nor the file name decide
    pub language: Option<String>,
    /// Theme name
    pub theme: String,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Whether to emit colors
    pub color: bool,
    /// Clip lines to this many display columns
    pub width: Option<usize>,
    /// Extra grammar files to load
    pub grammars: Vec<PathBuf>,
    /// Per-token style overrides
    pub colors: HashMap<TokenType, Style>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            theme: "default".to_string(),
            show_line_numbers: false,
            color: true,
            width: None,
            grammars: Vec::new(),
            colors: HashMap::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("HILITE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml(&contents)
    }

    /// Build configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings = Self::parse(contents)?;
        let mut config = Config::default();
        config.apply(&settings)?;
        Ok(config)
    }

    /// Parse config file contents
    fn parse(contents: &str) -> Result<Table> {
        Ok(contents.parse::<Table>()?)
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &Table) -> Result<()> {
        for (key, value) in settings {
            match key.as_str() {
                "language" => self.language = Some(expect_str(key, value)?.to_string()),
                "theme" => self.theme = expect_str(key, value)?.to_string(),
                "line-numbers" => self.show_line_numbers = expect_bool(key, value)?,
                "color" => self.color = expect_bool(key, value)?,
                "width" => {
                    let width = expect_int(key, value)?;
                    // Zero or negative disables clipping
                    self.width = (width > 0).then_some(width as usize);
                }
                "grammars" => {
                    let items = value
                        .as_array()
                        .ok_or_else(|| invalid(key, "a list of paths"))?;
                    self.grammars = items
                        .iter()
                        .map(|item| {
                            item.as_str()
                                .map(expand_home)
                                .ok_or_else(|| invalid(key, "a list of paths"))
                        })
                        .collect::<Result<Vec<_>>>()?;
                }
                "colors" => {
                    let table = value.as_table().ok_or_else(|| invalid(key, "a table"))?;
                    for (name, spec) in table {
                        let kind = TokenType::from_name(name)
                            .ok_or_else(|| HiliteError::UnknownTokenType(name.clone()))?;
                        let style = Style::parse(expect_str(name, spec)?)?;
                        self.colors.insert(kind, style);
                    }
                }
                _ => warn!(key = %key, "ignoring unknown configuration key"),
            }
        }
        Ok(())
    }

    /// Resolve the configured theme with color overrides applied
    pub fn theme(&self) -> Result<Theme> {
        let mut theme = Theme::by_name(&self.theme)?;
        for (&kind, &style) in &self.colors {
            theme.set(kind, style);
        }
        Ok(theme)
    }
}

fn expect_str<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| invalid(key, "a string"))
}

fn expect_bool(key: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| invalid(key, "true or false"))
}

fn expect_int(key: &str, value: &Value) -> Result<i64> {
    value.as_integer().ok_or_else(|| invalid(key, "an integer"))
}

fn invalid(key: &str, expected: &str) -> HiliteError {
    HiliteError::Message(format!("config: '{}' must be {}", key, expected))
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Color;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
language = "python"
theme = "funky"
line-numbers = true
color = false
width = 80
grammars = ["/etc/hilite/sql.toml"]

[colors]
keyword = "red bold"
        "#;

        let config = Config::from_toml(contents).unwrap();
        assert_eq!(config.language.as_deref(), Some("python"));
        assert_eq!(config.theme, "funky");
        assert!(config.show_line_numbers);
        assert!(!config.color);
        assert_eq!(config.width, Some(80));
        assert_eq!(config.grammars, vec![PathBuf::from("/etc/hilite/sql.toml")]);
        assert_eq!(
            config.colors.get(&TokenType::Keyword),
            Some(&Style::fg(Color::Red).with_bold())
        );
    }

    #[test]
    fn test_defaults_and_unknown_keys() {
        let config = Config::from_toml("mystery = 1").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::from_toml("width = 0").unwrap().width, None);
    }

    #[test]
    fn test_malformed_values() {
        assert!(Config::from_toml("line-numbers = \"yes\"").is_err());
        assert!(Config::from_toml("width = \"wide\"").is_err());
        assert!(Config::from_toml("theme = [").is_err());
        assert!(matches!(
            Config::from_toml("[colors]\nsparkle = \"red\""),
            Err(HiliteError::UnknownTokenType(_))
        ));
        assert!(matches!(
            Config::from_toml("[colors]\nkeyword = \"mauve\""),
            Err(HiliteError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_theme_with_overrides() {
        let config = Config::from_toml("theme = \"funky\"\n[colors]\nfunction = \"blue\"").unwrap();
        let theme = config.theme().unwrap();
        assert_eq!(theme.name(), "funky");
        assert_eq!(theme.style(TokenType::Function), Style::fg(Color::Blue));

        let config = Config::from_toml("theme = \"neon\"").unwrap();
        assert!(matches!(config.theme(), Err(HiliteError::UnknownTheme(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "line-numbers = true").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(config.show_line_numbers);

        let missing = file.path().with_extension("missing");
        assert!(matches!(Config::load_from(&missing), Err(HiliteError::Io(_))));
    }
}
