//! In-memory backend that records every drawing operation.
//!
//! Useful for dry runs and for asserting on layout geometry without decoding a PDF.  Text is
//! measured as half an em per character so results are easy to predict.

use std::fmt::Write as _;

use super::{BackendError, DocumentBackend};
use crate::backend::metrics::StandardFamily;
use crate::geometry::Rect;
use crate::imaging::ImageSource;
use crate::style::{FontSpec, Rgb};

/// Width of every character, in em.
pub const CHAR_WIDTH_EM: f64 = 0.5;

/// A recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    BeginPage {
        index: usize,
        width: f64,
        height: f64,
    },
    SelectFont(FontSpec),
    FillRect {
        page: usize,
        rect: Rect,
        color: Rgb,
    },
    StrokeRect {
        page: usize,
        rect: Rect,
        color: Rgb,
        line_width: f64,
    },
    Text {
        page: usize,
        x: f64,
        baseline: f64,
        font: FontSpec,
        color: Rgb,
        text: String,
    },
    Image {
        page: usize,
        rect: Rect,
        source: String,
    },
}

/// Records drawing calls instead of encoding a document.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<DrawOp>,
    pages: usize,
    extra_families: Vec<String>,
    fail_finish: bool,
}

impl RecordingBackend {
    /// Creates a backend that knows the standard Times, Helvetica and Courier families.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts an additional family name in [`DocumentBackend::select_font`].
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.extra_families.push(family.into().to_ascii_lowercase());
        self
    }

    /// Makes [`DocumentBackend::finish`] fail.
    pub fn failing_finish(mut self) -> Self {
        self.fail_finish = true;
        self
    }

    /// All recorded operations in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of pages begun.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Rectangles stroked as cell borders.
    pub fn stroked_rects(&self) -> Vec<(usize, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeRect { page, rect, .. } => Some((*page, *rect)),
                _ => None,
            })
            .collect()
    }

    /// Rectangles painted with a fill color.
    pub fn filled_rects(&self) -> Vec<(usize, Rect, Rgb)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { page, rect, color } => Some((*page, *rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Text runs as `(page, x, baseline, text)`.
    pub fn texts(&self) -> Vec<(usize, f64, f64, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    page,
                    x,
                    baseline,
                    text,
                    ..
                } => Some((*page, *x, *baseline, text.as_str())),
                _ => None,
            })
            .collect()
    }

    fn current_page(&self) -> usize {
        self.pages.saturating_sub(1)
    }

    fn knows_family(&self, family: &str) -> bool {
        StandardFamily::resolve(family).is_some()
            || self
                .extra_families
                .iter()
                .any(|known| known == &family.to_ascii_lowercase())
    }
}

impl DocumentBackend for RecordingBackend {
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), BackendError> {
        self.ops.push(DrawOp::BeginPage {
            index: self.pages,
            width,
            height,
        });
        self.pages += 1;
        Ok(())
    }

    fn select_font(&mut self, font: &FontSpec) -> Result<(), BackendError> {
        if !self.knows_family(font.family()) {
            return Err(BackendError::UnknownFont {
                family: font.family().to_owned(),
            });
        }
        self.ops.push(DrawOp::SelectFont(font.clone()));
        Ok(())
    }

    fn text_width(&self, font: &FontSpec, text: &str) -> f64 {
        text.chars().count() as f64 * CHAR_WIDTH_EM * font.size_mm()
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::FillRect {
            page: self.current_page(),
            rect,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            page: self.current_page(),
            rect,
            color,
            line_width,
        });
    }

    fn draw_text(&mut self, x: f64, baseline: f64, font: &FontSpec, color: Rgb, text: &str) {
        self.ops.push(DrawOp::Text {
            page: self.current_page(),
            x,
            baseline,
            font: font.clone(),
            color,
            text: text.to_owned(),
        });
    }

    fn place_image(&mut self, image: &ImageSource, rect: Rect) -> Result<(), BackendError> {
        if let ImageSource::Path(path) = image {
            if !path.is_file() {
                return Err(BackendError::Image {
                    image: image.to_string(),
                    source: crate::imaging::ImageLoadError::Missing { path: path.clone() },
                });
            }
        }
        self.ops.push(DrawOp::Image {
            page: self.current_page(),
            rect,
            source: image.to_string(),
        });
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, BackendError> {
        if self.fail_finish {
            return Err(BackendError::Finalize {
                message: "recording backend configured to fail".to_owned(),
            });
        }
        let mut log = String::new();
        for op in &self.ops {
            // Writing into a String cannot fail.
            let _ = writeln!(log, "{op:?}");
        }
        Ok(log.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawOp, RecordingBackend};
    use crate::backend::{BackendError, DocumentBackend};
    use crate::imaging::ImageSource;
    use crate::style::FontSpec;

    #[test]
    fn rejects_unknown_families() {
        let mut backend = RecordingBackend::new();
        let result = backend.select_font(&FontSpec::regular("Wingdings", 12.0));
        assert!(matches!(result, Err(BackendError::UnknownFont { .. })));

        let mut backend = RecordingBackend::new().with_family("Roboto");
        assert!(backend.select_font(&FontSpec::regular("roboto", 12.0)).is_ok());
    }

    #[test]
    fn finish_dumps_operation_log() {
        let mut backend = RecordingBackend::new();
        backend.begin_page(100.0, 50.0).expect("page");
        backend
            .place_image(&ImageSource::from_bytes(vec![0u8; 3]), Default::default())
            .expect("image");
        assert!(matches!(backend.ops()[0], DrawOp::BeginPage { index: 0, .. }));

        let log = String::from_utf8(backend.finish().expect("finish")).expect("utf8");
        assert_eq!(log.lines().count(), 2);
    }
}
