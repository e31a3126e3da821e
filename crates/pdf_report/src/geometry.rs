//! Page geometry in millimetres.
//!
//! All coordinates handed to the layout engine use a top-left origin with the y axis growing
//! downwards, matching how rows are laid out on paper.  Backends that use another convention
//! (PDF's bottom-left origin, for instance) flip the values at the very last moment.

/// Number of millimetres in one typographic point.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Converts a size in points into millimetres.
pub fn pt_to_mm(points: f64) -> f64 {
    points * PT_TO_MM
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Distance from the left page edge.
    pub x: f64,
    /// Distance from the top page edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` when the rectangle covers no area.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Standard paper formats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PaperSize {
    /// ISO A3.
    A3,
    /// ISO A4.
    A4,
    /// ISO A5.
    A5,
    /// US Letter.
    #[default]
    Letter,
    /// US Legal.
    Legal,
    /// Arbitrary portrait dimensions in millimetres.
    Custom {
        /// Portrait width.
        width: f64,
        /// Portrait height.
        height: f64,
    },
}

impl PaperSize {
    /// Returns the `(width, height)` of the format in portrait orientation.
    pub fn portrait_dimensions(&self) -> (f64, f64) {
        match *self {
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
            Self::Custom { width, height } => (width, height),
        }
    }
}

/// Page orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Height exceeds width.
    Portrait,
    /// Width exceeds height.
    #[default]
    Landscape,
}

/// Distances between the page edges and the printable area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Left margin, also the x coordinate every new line starts at.
    pub left: f64,
    /// Top margin, the y coordinate of every new page.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin; content crossing it triggers a page break.
    pub bottom: f64,
}

impl Margins {
    /// Creates margins from explicit values.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Uses the same distance on every side.
    pub fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(10.0, 10.0, 10.0, 20.0)
    }
}

impl From<f64> for Margins {
    fn from(value: f64) -> Self {
        Self::all(value)
    }
}

const DEFAULT_CELL_PADDING_MM: f64 = 1.0;

/// Paper, orientation, margins and cell padding for one rendered document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    paper: PaperSize,
    orientation: Orientation,
    margins: Margins,
    cell_padding: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            cell_padding: DEFAULT_CELL_PADDING_MM,
        }
    }
}

impl PageSetup {
    /// Creates the default setup (Letter, landscape, 10 mm margins with a 20 mm bottom).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper format.
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    /// Sets the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Sets the horizontal inset between a cell edge and its text.
    pub fn with_cell_padding(mut self, padding: f64) -> Self {
        self.cell_padding = padding;
        self
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn cell_padding(&self) -> f64 {
        self.cell_padding
    }

    /// Returns the `(width, height)` of a page after applying the orientation.
    pub fn page_dimensions(&self) -> (f64, f64) {
        let (width, height) = self.paper.portrait_dimensions();
        match self.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }

    pub fn page_width(&self) -> f64 {
        self.page_dimensions().0
    }

    pub fn page_height(&self) -> f64 {
        self.page_dimensions().1
    }

    /// Y coordinate below which content must not extend.
    pub fn printable_bottom(&self) -> f64 {
        self.page_height() - self.margins.bottom
    }

    /// X coordinate of the right margin.
    pub fn printable_right(&self) -> f64 {
        self.page_width() - self.margins.right
    }

    /// Height available between the top and bottom margins.
    pub fn printable_height(&self) -> f64 {
        self.printable_bottom() - self.margins.top
    }
}

#[cfg(test)]
mod tests {
    use super::{Orientation, PageSetup, PaperSize};

    #[test]
    fn landscape_swaps_letter_dimensions() {
        let setup = PageSetup::new();
        assert_eq!(setup.page_dimensions(), (279.4, 215.9));

        let portrait = setup.with_orientation(Orientation::Portrait);
        assert_eq!(portrait.page_dimensions(), (215.9, 279.4));
    }

    #[test]
    fn printable_area_respects_margins() {
        let setup = PageSetup::new()
            .with_paper(PaperSize::A4)
            .with_orientation(Orientation::Portrait)
            .with_margins(15.0);

        assert_eq!(setup.printable_bottom(), 282.0);
        assert_eq!(setup.printable_right(), 195.0);
        assert_eq!(setup.printable_height(), 267.0);
    }
}
