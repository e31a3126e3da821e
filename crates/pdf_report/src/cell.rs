//! Cell descriptions and text placement inside a cell.

use crate::geometry::Rect;
use crate::style::HorizontalAlignment;

/// Where the cursor goes after a cell has been drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Advance {
    /// Continue to the right of the cell.
    #[default]
    Right,
    /// Start a new line below the cell, using the cell height.
    NewLine,
}

/// A single rectangular cell to draw at the cursor position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellSpec {
    width: f64,
    height: f64,
    text: String,
    border: bool,
    fill: bool,
    align: HorizontalAlignment,
    advance: Advance,
}

impl CellSpec {
    /// Creates an empty, borderless, unfilled, left-aligned cell that advances right.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn is_filled(&self) -> bool {
        self.fill
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.align
    }

    pub fn advance(&self) -> Advance {
        self.advance
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Enables or disables the four-sided border.
    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Enables or disables painting the interior with the active fill color.
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_advance(mut self, advance: Advance) -> Self {
        self.advance = advance;
        self
    }

    /// Shorthand for `with_border(true)`.
    pub fn bordered(self) -> Self {
        self.with_border(true)
    }

    /// Shorthand for `with_fill(true)`.
    pub fn filled(self) -> Self {
        self.with_fill(true)
    }

    pub(crate) fn rect_at(&self, x: f64, y: f64) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

/// Returns the text origin `(x, baseline)` for a string of `text_width` in `cell`.
///
/// The baseline sits at the vertical centre of the cell pushed down by 30% of the font size,
/// which centres the x-height of Latin text visually.
pub fn text_origin(
    cell: Rect,
    text_width: f64,
    font_size_mm: f64,
    align: HorizontalAlignment,
    padding: f64,
) -> (f64, f64) {
    let x = match align {
        HorizontalAlignment::Left => cell.x + padding,
        HorizontalAlignment::Center => cell.x + (cell.width - text_width) / 2.0,
        HorizontalAlignment::Right => cell.right() - padding - text_width,
    };
    let baseline = cell.y + 0.5 * cell.height + 0.3 * font_size_mm;
    (x, baseline)
}
