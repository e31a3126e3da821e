//! Advance widths of the standard PDF fonts.
//!
//! The tables hold the Adobe AFM widths (in 1/1000 em) of the printable ASCII range `' '..='~'`.
//! Characters outside that range are measured with the width of `n`.

use crate::geometry;
use crate::style::FontStyle;

const FIRST: u32 = 32;
const LAST: u32 = 126;
const FALLBACK_CHAR: char = 'n';
const COURIER_WIDTH: u16 = 600;

type WidthTable = [u16; 95];

#[rustfmt::skip]
const HELVETICA: WidthTable = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: WidthTable = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: WidthTable = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: WidthTable = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC: WidthTable = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 675, 675, 675, 500, 920,
    611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
    667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
    389, 278, 389, 422, 500, 333,
    500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
    500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
    400, 275, 400, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_ITALIC: WidthTable = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 832,
    667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889,
    722, 722, 611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611,
    333, 278, 333, 570, 500, 333,
    500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778,
    556, 500, 500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389,
    348, 220, 348, 570,
];

/// The three families of the 14 standard PDF fonts that carry text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardFamily {
    Times,
    Helvetica,
    Courier,
}

impl StandardFamily {
    /// Maps a family name (case-insensitive, common aliases included) to a standard family.
    pub fn resolve(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "times" | "times-roman" | "times new roman" | "serif" => Some(Self::Times),
            "helvetica" | "arial" | "sans-serif" | "sans" => Some(Self::Helvetica),
            "courier" | "courier new" | "monospace" => Some(Self::Courier),
            _ => None,
        }
    }

    fn table(&self, style: FontStyle) -> Option<&'static WidthTable> {
        match (self, style) {
            (Self::Courier, _) => None,
            (Self::Helvetica, FontStyle::Regular | FontStyle::Italic) => Some(&HELVETICA),
            (Self::Helvetica, FontStyle::Bold | FontStyle::BoldItalic) => Some(&HELVETICA_BOLD),
            (Self::Times, FontStyle::Regular) => Some(&TIMES_ROMAN),
            (Self::Times, FontStyle::Bold) => Some(&TIMES_BOLD),
            (Self::Times, FontStyle::Italic) => Some(&TIMES_ITALIC),
            (Self::Times, FontStyle::BoldItalic) => Some(&TIMES_BOLD_ITALIC),
        }
    }

    /// Advance width of `c` in 1/1000 em.
    pub fn char_width(&self, style: FontStyle, c: char) -> u16 {
        let Some(table) = self.table(style) else {
            return COURIER_WIDTH;
        };
        let code = u32::from(c);
        let index = if (FIRST..=LAST).contains(&code) {
            code - FIRST
        } else {
            u32::from(FALLBACK_CHAR) - FIRST
        };
        table[index as usize]
    }

    /// Width of `text` in millimetres at `size` points.
    pub fn text_width(&self, style: FontStyle, size: f64, text: &str) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.char_width(style, c)))
            .sum();
        f64::from(units) / 1000.0 * geometry::pt_to_mm(size)
    }
}

#[cfg(test)]
mod tests {
    use super::StandardFamily;
    use crate::style::FontStyle;

    #[test]
    fn resolves_aliases() {
        assert_eq!(StandardFamily::resolve("Times"), Some(StandardFamily::Times));
        assert_eq!(StandardFamily::resolve("ARIAL"), Some(StandardFamily::Helvetica));
        assert_eq!(StandardFamily::resolve("courier"), Some(StandardFamily::Courier));
        assert_eq!(StandardFamily::resolve("Comic Sans"), None);
    }

    #[test]
    fn courier_is_monospaced() {
        let family = StandardFamily::Courier;
        let size = 72.0;
        // 72pt is one inch; each glyph advances 0.6 em.
        let width = family.text_width(FontStyle::Bold, size, "iiWW");
        assert!((width - 4.0 * 0.6 * 25.4).abs() < 1e-9);
    }

    #[test]
    fn proportional_widths_follow_tables() {
        let family = StandardFamily::Helvetica;
        assert_eq!(family.char_width(FontStyle::Regular, 'i'), 222);
        assert_eq!(family.char_width(FontStyle::Bold, 'i'), 278);
        assert_eq!(family.char_width(FontStyle::Regular, 'W'), 944);
        assert_eq!(StandardFamily::Times.char_width(FontStyle::Regular, '9'), 500);
    }

    #[test]
    fn non_ascii_uses_fallback_width() {
        let family = StandardFamily::Times;
        assert_eq!(
            family.char_width(FontStyle::Regular, 'é'),
            family.char_width(FontStyle::Regular, 'n')
        );
    }
}
