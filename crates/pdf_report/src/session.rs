//! Cursor-driven rendering with a sticky fault.
//!
//! A [`RenderSession`] wraps one [`DocumentBackend`] for the lifetime of a single document.
//! Drawing calls never return errors: the first problem is stored as a [`Fault`], every later
//! mutating call becomes a no-op, and [`RenderSession::finish`] reports the outcome once.

use crate::backend::{BackendError, DocumentBackend};
use crate::cell::{text_origin, Advance, CellSpec};
use crate::cursor::{LayoutCursor, LineHeight};
use crate::fault::{Fault, FaultKind};
use crate::geometry::{PageSetup, Rect};
use crate::imaging::ImageSource;
use crate::style::{FontSpec, Rgb, Style};

fn fault_from_backend(err: &BackendError) -> Fault {
    let kind = match err {
        BackendError::UnknownFont { .. } => FaultKind::UnknownFont,
        BackendError::FontLoad { .. } => FaultKind::InvalidStyle,
        BackendError::Image { .. } => FaultKind::Image,
        BackendError::Page { .. } => FaultKind::Backend,
        BackendError::Finalize { .. } => FaultKind::Finalize,
    };
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    Fault::new(kind, message)
}

/// Layout state for one document rendered through a backend.
pub struct RenderSession<B: DocumentBackend> {
    backend: B,
    setup: PageSetup,
    cursor: LayoutCursor,
    style: Style,
    fault: Option<Fault>,
}

impl<B: DocumentBackend> RenderSession<B> {
    /// Creates a session with no page started and the default style.
    pub fn new(backend: B, setup: PageSetup) -> Self {
        Self {
            cursor: LayoutCursor::new(&setup),
            backend,
            setup,
            style: Style::default(),
            fault: None,
        }
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The recorded fault, if any.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.cursor.page_count()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Records `fault` unless an earlier one is already stored.
    pub fn fail(&mut self, fault: Fault) {
        match &self.fault {
            Some(existing) => {
                log::debug!("dropping fault after '{}': {}", existing, fault);
            }
            None => {
                log::warn!("render session faulted: {}", fault);
                self.fault = Some(fault);
            }
        }
    }

    /// Starts a new page and moves the cursor to its top-left printable corner.
    pub fn add_page(&mut self) {
        if self.is_faulted() {
            return;
        }
        let (width, height) = self.setup.page_dimensions();
        if let Err(err) = self.backend.begin_page(width, height) {
            self.fail(fault_from_backend(&err));
            return;
        }
        self.cursor.start_page();
        log::debug!("started page {}", self.cursor.page_count());

        // A font selected before the document existed is loaded now, so load failures are
        // recorded instead of surfacing while text is drawn.
        if let Some(font) = self.style.font.clone() {
            if let Err(err) = self.backend.select_font(&font) {
                self.fail(fault_from_backend(&err));
            }
        }
    }

    /// Selects the font used for cell text.
    pub fn set_font(&mut self, font: FontSpec) {
        if self.is_faulted() {
            return;
        }
        if !font.size().is_finite() || font.size() <= 0.0 {
            self.fail(Fault::new(
                FaultKind::InvalidStyle,
                format!("font size must be positive, got {}", font.size()),
            ));
            return;
        }
        if let Err(err) = self.backend.select_font(&font) {
            self.fail(fault_from_backend(&err));
            return;
        }
        self.style.font = Some(font);
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        if !self.is_faulted() {
            self.style.fill_color = color;
        }
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        if !self.is_faulted() {
            self.style.text_color = color;
        }
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        if !self.is_faulted() {
            self.style.draw_color = color;
        }
    }

    /// Sets the border stroke width in millimetres.
    pub fn set_line_width(&mut self, width: f64) {
        if self.is_faulted() {
            return;
        }
        if !width.is_finite() || width < 0.0 {
            self.fail(Fault::new(
                FaultKind::InvalidStyle,
                format!("line width must not be negative, got {width}"),
            ));
            return;
        }
        self.style.line_width = width;
    }

    /// Turns border strokes on or off for every subsequent cell.
    pub fn set_borders_visible(&mut self, visible: bool) {
        if !self.is_faulted() {
            self.style.borders_visible = visible;
        }
    }

    /// Draws `cell` at the cursor and advances the cursor.
    pub fn draw_cell(&mut self, cell: &CellSpec) {
        if self.is_faulted() {
            return;
        }
        let (width, height) = (cell.width(), cell.height());
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            self.fail(Fault::new(
                FaultKind::InvalidGeometry,
                format!("cell dimensions must not be negative, got {width}x{height}"),
            ));
            return;
        }
        let Some(page) = self.cursor.page_index() else {
            self.fail(Fault::new(
                FaultKind::NoPage,
                "cell drawn before any page was started",
            ));
            return;
        };

        let rect = cell.rect_at(self.cursor.x(), self.cursor.y());
        if !rect.is_degenerate() {
            if !cell.text().is_empty() && self.style.font.is_none() {
                self.fail(Fault::new(
                    FaultKind::InvalidStyle,
                    format!("text '{}' on page {} has no font selected", cell.text(), page + 1),
                ));
                return;
            }
            if cell.is_filled() {
                self.backend.fill_rect(rect, self.style.fill_color);
            }
            if cell.has_border() && self.style.borders_visible {
                self.backend
                    .stroke_rect(rect, self.style.draw_color, self.style.line_width);
            }
            if let Some(font) = self.style.font.as_ref().filter(|_| !cell.text().is_empty()) {
                let text_width = self.backend.text_width(font, cell.text());
                let (x, baseline) = text_origin(
                    rect,
                    text_width,
                    font.size_mm(),
                    cell.alignment(),
                    self.setup.cell_padding(),
                );
                self.backend
                    .draw_text(x, baseline, font, self.style.text_color, cell.text());
            }
        }

        self.cursor.set_last_cell_height(height);
        match cell.advance() {
            Advance::Right => self.cursor.advance_by(width),
            Advance::NewLine => self.cursor.new_line(LineHeight::Exact(height)),
        }
    }

    /// Returns to the left margin and moves down by `height`.
    pub fn new_line(&mut self, height: impl Into<LineHeight>) {
        if !self.is_faulted() {
            self.cursor.new_line(height.into());
        }
    }

    /// Starts a new page when `needed` millimetres do not fit above the bottom margin.
    ///
    /// Returns `true` when a page was started.
    pub fn page_break_if_needed(&mut self, needed: f64) -> bool {
        if self.is_faulted() || self.cursor.fits(needed) {
            return false;
        }
        log::debug!(
            "page break at y={:.2} for {:.2} mm on page {}",
            self.cursor.y(),
            needed,
            self.cursor.page_count()
        );
        self.add_page();
        !self.is_faulted()
    }

    /// Places `image` into `rect` on the current page without moving the cursor.
    pub fn place_image(&mut self, image: &ImageSource, rect: Rect) {
        if self.is_faulted() {
            return;
        }
        if !rect.width.is_finite() || !rect.height.is_finite() || rect.width < 0.0 || rect.height < 0.0
        {
            self.fail(Fault::new(
                FaultKind::InvalidGeometry,
                format!("image box must not be negative, got {}x{}", rect.width, rect.height),
            ));
            return;
        }
        if self.cursor.page_index().is_none() {
            self.fail(Fault::new(
                FaultKind::NoPage,
                format!("image {image} placed before any page was started"),
            ));
            return;
        }
        if let Err(err) = self.backend.place_image(image, rect) {
            self.fail(fault_from_backend(&err));
        }
    }

    /// Returns the recorded fault, or the finished document.
    pub fn finish(self) -> Result<Vec<u8>, Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        self.backend.finish().map_err(|err| {
            let fault = Fault::new(FaultKind::Finalize, fault_from_backend(&err).message());
            log::warn!("render session faulted: {}", fault);
            fault
        })
    }

    /// Gives the backend back, dropping any recorded fault.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
