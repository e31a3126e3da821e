//! Style primitives shared by the session, the report builder and the backends.

use std::fmt;
use std::str::FromStr;

use crate::geometry;

/// Horizontal placement of text inside a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Text starts one cell padding after the left edge.
    #[default]
    Left,
    /// Text is centred between both edges.
    Center,
    /// Text ends one cell padding before the right edge.
    Right,
}

/// Error returned when parsing an alignment or font style code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {what} code '{code}'")]
pub struct ParseCodeError {
    what: &'static str,
    code: String,
}

impl FromStr for HorizontalAlignment {
    type Err = ParseCodeError;

    /// Accepts the single-letter codes `L`, `C` and `R` (case-insensitive).  An empty string
    /// means left alignment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "L" => Ok(Self::Left),
            "C" => Ok(Self::Center),
            "R" => Ok(Self::Right),
            _ => Err(ParseCodeError {
                what: "alignment",
                code: s.to_owned(),
            }),
        }
    }
}

/// Weight and slant of a font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Builds a style from independent bold/italic flags.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

impl FromStr for FontStyle {
    type Err = ParseCodeError;

    /// Accepts any combination of `B` and `I`; the empty string is the regular style.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bold = false;
        let mut italic = false;
        for c in s.trim().chars() {
            match c.to_ascii_uppercase() {
                'B' => bold = true,
                'I' => italic = true,
                _ => {
                    return Err(ParseCodeError {
                        what: "font style",
                        code: s.to_owned(),
                    })
                }
            }
        }
        Ok(Self::from_flags(bold, italic))
    }
}

/// A font family, style and size in points.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    family: String,
    style: FontStyle,
    size: f64,
}

impl FontSpec {
    /// Creates a font description.  The family name is resolved by the backend.
    pub fn new(family: impl Into<String>, style: FontStyle, size: f64) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    /// Shorthand for a regular font.
    pub fn regular(family: impl Into<String>, size: f64) -> Self {
        Self::new(family, FontStyle::Regular, size)
    }

    /// Shorthand for a bold font.
    pub fn bold(family: impl Into<String>, size: f64) -> Self {
        Self::new(family, FontStyle::Bold, size)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Size in points.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Size converted to millimetres.
    pub fn size_mm(&self) -> f64 {
        geometry::pt_to_mm(self.size)
    }

    /// Returns the same font at a different size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Returns the same font with a different style.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {}pt", self.family, self.style, self.size)
    }
}

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray with all channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

const DEFAULT_LINE_WIDTH_MM: f64 = 0.2;

/// Mutable drawing state of a [`RenderSession`][crate::session::RenderSession].
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Font used for cell text; `None` until a font has been selected.
    pub font: Option<FontSpec>,
    /// Color painted into filled cells.
    pub fill_color: Rgb,
    /// Color of cell text.
    pub text_color: Rgb,
    /// Color of cell borders.
    pub draw_color: Rgb,
    /// Border stroke width in millimetres.
    pub line_width: f64,
    /// When `false`, bordered cells are drawn without their stroke.
    pub borders_visible: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: None,
            fill_color: Rgb::WHITE,
            text_color: Rgb::BLACK,
            draw_color: Rgb::BLACK,
            line_width: DEFAULT_LINE_WIDTH_MM,
            borders_visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FontStyle, HorizontalAlignment};

    #[test]
    fn parses_alignment_codes() {
        let parsed: Vec<HorizontalAlignment> = ["L", "c", "R", ""]
            .iter()
            .map(|code| code.parse().expect("valid code"))
            .collect();
        assert_eq!(
            parsed,
            vec![
                HorizontalAlignment::Left,
                HorizontalAlignment::Center,
                HorizontalAlignment::Right,
                HorizontalAlignment::Left,
            ]
        );
        assert!("X".parse::<HorizontalAlignment>().is_err());
    }

    #[test]
    fn parses_font_style_codes() {
        assert_eq!("".parse::<FontStyle>(), Ok(FontStyle::Regular));
        assert_eq!("B".parse::<FontStyle>(), Ok(FontStyle::Bold));
        assert_eq!("ib".parse::<FontStyle>(), Ok(FontStyle::BoldItalic));
        assert!("U".parse::<FontStyle>().is_err());
    }
}
