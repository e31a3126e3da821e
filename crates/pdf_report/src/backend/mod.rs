//! The seam between the layout engine and a concrete document format.
//!
//! A [`DocumentBackend`] receives absolute, top-left based coordinates in millimetres.  Pure
//! drawing primitives cannot fail; the operations that can fail for document-wide reasons return
//! a [`BackendError`] which the session turns into its sticky fault.

pub mod metrics;
pub mod pdf;
pub mod recording;

pub use pdf::PdfBackend;
pub use recording::{DrawOp, RecordingBackend};

use crate::geometry::Rect;
use crate::imaging::{ImageLoadError, ImageSource};
use crate::style::{FontSpec, Rgb};

/// Errors reported by document backends.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("unknown font family '{family}'")]
    UnknownFont { family: String },
    #[error("failed to load font {font}: {message}")]
    FontLoad { font: String, message: String },
    #[error("failed to start page {page}: {message}")]
    Page { page: usize, message: String },
    #[error("failed to place image {image}")]
    Image {
        image: String,
        #[source]
        source: ImageLoadError,
    },
    #[error("failed to finalize document: {message}")]
    Finalize { message: String },
}

/// Primitive drawing capabilities the layout engine relies on.
pub trait DocumentBackend {
    /// Starts a new page of the given size; subsequent drawing targets it.
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), BackendError>;

    /// Resolves and loads a font so it can be measured and drawn.
    fn select_font(&mut self, font: &FontSpec) -> Result<(), BackendError>;

    /// Width of `text` in millimetres when set in `font`.
    fn text_width(&self, font: &FontSpec, text: &str) -> f64;

    /// Paints the interior of `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Strokes the four edges of `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f64);

    /// Draws `text` with its left end at `x` on the given baseline.
    fn draw_text(&mut self, x: f64, baseline: f64, font: &FontSpec, color: Rgb, text: &str);

    /// Places an image scaled into `rect`.
    fn place_image(&mut self, image: &ImageSource, rect: Rect) -> Result<(), BackendError>;

    /// Produces the finished document.
    fn finish(self) -> Result<Vec<u8>, BackendError>
    where
        Self: Sized;
}
