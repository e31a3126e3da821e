//! Output position and page bookkeeping.

use crate::geometry::PageSetup;

/// Height used when moving to the next line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineHeight {
    /// Move down by exactly this many millimetres.
    Exact(f64),
    /// Move down by the height of the most recently drawn cell.
    Auto,
}

impl From<f64> for LineHeight {
    fn from(height: f64) -> Self {
        Self::Exact(height)
    }
}

/// Current drawing position, page counter, and printable bounds.
///
/// The cursor never wraps on its own: advancing past the right margin is allowed, and callers
/// decide where lines end.  Vertical overflow is handled through [`LayoutCursor::fits`] and
/// [`LayoutCursor::start_page`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCursor {
    x: f64,
    y: f64,
    pages: usize,
    left: f64,
    top: f64,
    bottom: f64,
    last_cell_height: Option<f64>,
}

impl LayoutCursor {
    /// Creates a cursor at the top-left printable corner with no page started.
    pub fn new(setup: &PageSetup) -> Self {
        let margins = setup.margins();
        Self {
            x: margins.left,
            y: margins.top,
            pages: 0,
            left: margins.left,
            top: margins.top,
            bottom: setup.printable_bottom(),
            last_cell_height: None,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Zero-based index of the current page, if any page has been started.
    pub fn page_index(&self) -> Option<usize> {
        self.pages.checked_sub(1)
    }

    /// Height of the most recently drawn cell.
    pub fn last_cell_height(&self) -> Option<f64> {
        self.last_cell_height
    }

    pub(crate) fn set_last_cell_height(&mut self, height: f64) {
        self.last_cell_height = Some(height);
    }

    /// Moves right by `width`.
    pub fn advance_by(&mut self, width: f64) {
        self.x += width;
    }

    /// Returns to the left margin and moves down.
    ///
    /// [`LineHeight::Auto`] without a previously drawn cell leaves the cursor untouched.
    pub fn new_line(&mut self, height: LineHeight) {
        let height = match height {
            LineHeight::Exact(height) => height,
            LineHeight::Auto => match self.last_cell_height {
                Some(height) => height,
                None => return,
            },
        };
        self.x = self.left;
        self.y += height;
    }

    /// Whether `needed` millimetres still fit above the bottom margin.
    pub fn fits(&self, needed: f64) -> bool {
        self.y + needed <= self.bottom
    }

    /// Counts a new page and moves to its top-left printable corner.
    pub fn start_page(&mut self) {
        self.pages += 1;
        self.x = self.left;
        self.y = self.top;
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutCursor, LineHeight};
    use crate::geometry::{Margins, PageSetup};

    fn cursor() -> LayoutCursor {
        LayoutCursor::new(&PageSetup::new().with_margins(Margins::new(10.0, 12.0, 10.0, 20.0)))
    }

    #[test]
    fn starts_at_top_left_margin_without_pages() {
        let cursor = cursor();
        assert_eq!(cursor.position(), (10.0, 12.0));
        assert_eq!(cursor.page_index(), None);
    }

    #[test]
    fn explicit_new_line_resets_x() {
        let mut cursor = cursor();
        cursor.advance_by(120.0);
        cursor.new_line(LineHeight::Exact(7.5));
        assert_eq!(cursor.position(), (10.0, 19.5));
    }

    #[test]
    fn auto_new_line_without_cell_is_noop() {
        let mut cursor = cursor();
        cursor.advance_by(30.0);
        cursor.new_line(LineHeight::Auto);
        assert_eq!(cursor.position(), (40.0, 12.0));
    }

    #[test]
    fn start_page_resets_position() {
        let mut cursor = cursor();
        cursor.start_page();
        cursor.advance_by(50.0);
        cursor.new_line(LineHeight::Exact(100.0));
        cursor.start_page();
        assert_eq!(cursor.position(), (10.0, 12.0));
        assert_eq!(cursor.page_index(), Some(1));
    }

    #[test]
    fn fits_up_to_bottom_margin() {
        let cursor = cursor();
        // Letter landscape: 215.9 high, 20 mm bottom margin.
        assert!(cursor.fits(183.0));
        assert!(!cursor.fits(184.0));
    }
}
