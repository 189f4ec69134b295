//! Visual configuration for the grid: colors, text attributes, and the
//! checkbox glyphs.
//!
//! `GridStyle` is plain data with builder methods. It can also be loaded
//! from a JSON document so embedding applications can theme the widget from
//! their own configuration files.

use std::path::Path;

use serde::Deserialize;

use crate::error::StyleError;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text attribute flags applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TextAttrs {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl TextAttrs {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            underline: false,
            reverse: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Style override returned by cell delegates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub attrs: TextAttrs,
}

impl CellStyle {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: TextAttrs::new(),
        }
    }

    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn attrs(mut self, attrs: TextAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Colors and glyphs for the whole widget.
///
/// Selected rows render with `selection_bg` behind the inverted foreground,
/// the cursor cell with `cursor_bg`, matching the scheme the rest of the
/// component family uses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    /// Glyph for a checked box.
    pub checked: char,
    /// Glyph for an unchecked box.
    pub unchecked: char,
    /// Width of the reserved checkbox column in terminal cells.
    pub check_column_width: u16,
    pub foreground: Rgb,
    pub background: Rgb,
    pub header_fg: Rgb,
    pub header_bg: Rgb,
    pub selection_bg: Rgb,
    pub cursor_bg: Rgb,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            checked: '■',
            unchecked: '□',
            check_column_width: 3,
            foreground: Rgb::new(255, 255, 255),
            background: Rgb::new(0, 0, 0),
            header_fg: Rgb::new(255, 255, 255),
            header_bg: Rgb::new(40, 40, 56),
            selection_bg: Rgb::new(110, 84, 148),
            cursor_bg: Rgb::new(162, 119, 255),
        }
    }
}

impl GridStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checked/unchecked glyph pair.
    pub fn glyphs(mut self, checked: char, unchecked: char) -> Self {
        self.checked = checked;
        self.unchecked = unchecked;
        self
    }

    /// Set the reserved column width. Clamped to at least one cell.
    pub fn check_column_width(mut self, width: u16) -> Self {
        self.check_column_width = width.max(1);
        self
    }

    pub fn selection_bg(mut self, color: Rgb) -> Self {
        self.selection_bg = color;
        self
    }

    pub fn cursor_bg(mut self, color: Rgb) -> Self {
        self.cursor_bg = color;
        self
    }

    /// Parse a style from a JSON document. Missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a style from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_empty_document() {
        let style = GridStyle::from_json_str("{}").unwrap();
        assert_eq!(style, GridStyle::default());
    }

    #[test]
    fn test_partial_document_overrides_only_named_fields() {
        let style =
            GridStyle::from_json_str(r#"{"checked": "x", "check_column_width": 5}"#).unwrap();
        assert_eq!(style.checked, 'x');
        assert_eq!(style.check_column_width, 5);
        assert_eq!(style.unchecked, GridStyle::default().unchecked);
    }

    #[test]
    fn test_malformed_document_reports_parse_error() {
        let err = GridStyle::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, StyleError::Parse(_)));
    }
}
