//! Rendering decorated lines to a terminal
//!
//! A line is cut into leaves at range boundaries; each leaf is written
//! with the style its class name resolves to in the theme.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::decorator::{DecorationCache, LineDecorator, RangeAnnotation};
use crate::document::Document;
use crate::error::Result;
use crate::syntax::{Color, Style, Tokenizer};
use crate::theme::Theme;

/// A maximal run of a line that shares one class name (or none)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub text: &'a str,
    pub class_name: Option<&'a str>,
}

/// Split a line into leaves according to its ranges
///
/// Ranges are expected sorted and disjoint; anything out of bounds, off a
/// char boundary or overlapping an earlier range is clamped.
pub fn leaves<'a>(text: &'a str, ranges: &'a [RangeAnnotation]) -> Vec<Leaf<'a>> {
    let mut leaves = Vec::new();
    let mut cursor = 0;

    for range in ranges {
        let start = floor_char_boundary(text, range.start()).max(cursor);
        let end = floor_char_boundary(text, range.end());
        if start >= end {
            continue;
        }
        if start > cursor {
            leaves.push(Leaf { text: &text[cursor..start], class_name: None });
        }
        leaves.push(Leaf {
            text: &text[start..end],
            class_name: Some(range.class_name.as_str()),
        });
        cursor = end;
    }

    if cursor < text.len() {
        leaves.push(Leaf { text: &text[cursor..], class_name: None });
    }

    leaves
}

/// Writes decorated documents as styled terminal output
pub struct Renderer {
    theme: Theme,
    /// Emit ANSI styling
    color: bool,
    /// Show a line-number gutter
    line_numbers: bool,
    /// Clip lines to this many display columns
    max_width: Option<usize>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            color: true,
            line_numbers: false,
            max_width: None,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    pub fn with_max_width(mut self, max_width: Option<usize>) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Run one decoration pass over the document and write every line
    pub fn render_document<W, T, C>(
        &self,
        out: &mut W,
        doc: &Document,
        decorator: &mut LineDecorator<T, C>,
    ) -> Result<()>
    where
        W: Write,
        T: Tokenizer,
        C: DecorationCache,
    {
        let gutter = line_number_width(doc.len());

        for (node, path) in doc.entries() {
            let ranges = decorator.decorate(node, &path);
            let text = node.string();
            let line_idx = path.root_index().unwrap_or_default();

            if self.line_numbers {
                self.render_line_number(out, line_idx, gutter)?;
            }
            self.render_line(out, &text, &ranges)?;
            queue!(out, Print("\n"))?;
        }

        out.flush()?;
        Ok(())
    }

    fn render_line_number<W: Write>(&self, out: &mut W, line_idx: usize, gutter: usize) -> Result<()> {
        let lnum = format!("{:>width$} ", line_idx + 1, width = gutter - 1);
        if self.color {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(lnum),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(lnum))?;
        }
        Ok(())
    }

    /// Write one line's leaves, without the trailing newline
    pub fn render_line<W: Write>(&self, out: &mut W, text: &str, ranges: &[RangeAnnotation]) -> Result<()> {
        let mut remaining = self.max_width.unwrap_or(usize::MAX);

        for leaf in leaves(text, ranges) {
            if remaining == 0 {
                break;
            }
            let (shown, width) = truncate_to_width(leaf.text, remaining);
            remaining -= width;

            let style = match (self.color, leaf.class_name) {
                (true, Some(class)) => self.theme.style_for_class(class),
                _ => Style::default(),
            };

            if style.is_default() {
                queue!(out, Print(shown))?;
            } else {
                apply_style(out, style)?;
                queue!(out, Print(shown), SetAttribute(Attribute::Reset))?;
            }

            if shown.len() < leaf.text.len() {
                break;
            }
        }

        Ok(())
    }
}

/// Width of the line-number gutter, including the separating space
pub fn line_number_width(line_count: usize) -> usize {
    let digits = line_count.max(1).to_string().len();
    digits.max(3) + 1 // minimum 3 digits + space
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

/// Longest prefix fitting in `max_width` columns, with its width
fn truncate_to_width(s: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;

    for (idx, ch) in s.char_indices() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            return (&s[..idx], width);
        }
        width += ch_width;
    }

    (s, width)
}

/// Nearest char boundary at or before `pos`, clamped to the text
fn floor_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut p = pos;
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}
