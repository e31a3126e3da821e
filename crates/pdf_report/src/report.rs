//! The daily table report.
//!
//! [`ReportBuilder`] lays out a [`Dataset`] in four fixed phases: a title block with the current
//! date, a shaded header row, bordered body rows with per-column alignment, and an optional image
//! in the top-right corner.  Every measurement lives in [`ReportLayout`].

use chrono::NaiveDate;

use crate::backend::{DocumentBackend, PdfBackend};
use crate::cell::CellSpec;
use crate::cursor::LineHeight;
use crate::dataset::Dataset;
use crate::error::ReportError;
use crate::geometry::{PageSetup, Rect};
use crate::imaging::ImageSource;
use crate::session::RenderSession;
use crate::style::{FontSpec, HorizontalAlignment, Rgb};

/// Column alignments of the classic orders report.
pub const DEFAULT_ALIGNMENTS: [HorizontalAlignment; 6] = [
    HorizontalAlignment::Left,
    HorizontalAlignment::Center,
    HorizontalAlignment::Left,
    HorizontalAlignment::Right,
    HorizontalAlignment::Right,
    HorizontalAlignment::Right,
];

const DATE_FORMAT: &str = "%a %b %-d, %Y";

/// Alignment table for `columns` columns: a prefix of [`DEFAULT_ALIGNMENTS`], padded with
/// [`HorizontalAlignment::Left`].
pub fn default_alignments(columns: usize) -> Vec<HorizontalAlignment> {
    (0..columns)
        .map(|index| {
            DEFAULT_ALIGNMENTS
                .get(index)
                .copied()
                .unwrap_or(HorizontalAlignment::Left)
        })
        .collect()
}

/// Formats `date` like "Mon Jan 2, 2006".
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Errors detected before any drawing starts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("alignment table has {alignments} entries but the header has {columns} columns")]
    AlignmentMismatch { alignments: usize, columns: usize },
}

/// Image drawn at a fixed position, independent of the cursor.
#[derive(Clone, Debug)]
pub struct ImagePlacement {
    pub source: ImageSource,
    pub rect: Rect,
}

/// Fonts, colors, sizes, and texts of a report.
#[derive(Clone, Debug)]
pub struct ReportLayout {
    title: String,
    date_line: String,
    title_font: FontSpec,
    date_font: FontSpec,
    header_font: FontSpec,
    body_font: FontSpec,
    header_fill: Rgb,
    body_fill: Rgb,
    title_cell: (f64, f64),
    title_gap: f64,
    date_gap: f64,
    column_width: f64,
    row_height: f64,
    alignments: Vec<HorizontalAlignment>,
    image: Option<ImagePlacement>,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            title: "Daily Report".to_owned(),
            date_line: format_date(chrono::Local::now().date_naive()),
            title_font: FontSpec::bold("Times", 28.0),
            date_font: FontSpec::regular("Times", 20.0),
            header_font: FontSpec::bold("Times", 16.0),
            body_font: FontSpec::regular("Times", 16.0),
            header_fill: Rgb::gray(240),
            body_fill: Rgb::WHITE,
            title_cell: (40.0, 10.0),
            title_gap: 12.0,
            date_gap: 20.0,
            column_width: 40.0,
            row_height: 7.0,
            alignments: DEFAULT_ALIGNMENTS.to_vec(),
            image: None,
        }
    }
}

impl ReportLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the text printed under the title.
    pub fn with_date_line(mut self, line: impl Into<String>) -> Self {
        self.date_line = line.into();
        self
    }

    /// Prints `date` under the title instead of today's date.
    pub fn with_date(self, date: NaiveDate) -> Self {
        self.with_date_line(format_date(date))
    }

    pub fn with_title_font(mut self, font: FontSpec) -> Self {
        self.title_font = font;
        self
    }

    pub fn with_date_font(mut self, font: FontSpec) -> Self {
        self.date_font = font;
        self
    }

    pub fn with_header_font(mut self, font: FontSpec) -> Self {
        self.header_font = font;
        self
    }

    pub fn with_body_font(mut self, font: FontSpec) -> Self {
        self.body_font = font;
        self
    }

    pub fn with_header_fill(mut self, color: Rgb) -> Self {
        self.header_fill = color;
        self
    }

    pub fn with_body_fill(mut self, color: Rgb) -> Self {
        self.body_fill = color;
        self
    }

    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Sets the per-column alignment of body cells.
    pub fn with_alignments(mut self, alignments: impl Into<Vec<HorizontalAlignment>>) -> Self {
        self.alignments = alignments.into();
        self
    }

    /// Draws `source` scaled into `rect` after the table.
    pub fn with_image(mut self, source: ImageSource, rect: Rect) -> Self {
        self.image = Some(ImagePlacement { source, rect });
        self
    }

    /// Draws `source` in the top-right corner used by the classic report, on the page the table
    /// ends on.
    pub fn with_corner_image(self, source: ImageSource) -> Self {
        self.with_image(source, Rect::new(225.0, 10.0, 25.0, 25.0))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date_line(&self) -> &str {
        &self.date_line
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn alignments(&self) -> &[HorizontalAlignment] {
        &self.alignments
    }

    pub fn image(&self) -> Option<&ImagePlacement> {
        self.image.as_ref()
    }
}

/// Renders datasets with a fixed [`ReportLayout`].
#[derive(Clone, Debug, Default)]
pub struct ReportBuilder {
    layout: ReportLayout,
}

impl ReportBuilder {
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Draws the report into `session`.
    ///
    /// Only the alignment table is checked up front.  Drawing problems are left in the session's
    /// fault and surface from [`RenderSession::finish`].
    pub fn render<B: DocumentBackend>(
        &self,
        session: &mut RenderSession<B>,
        data: &Dataset,
    ) -> Result<(), LayoutError> {
        if self.layout.alignments.len() != data.column_count() {
            return Err(LayoutError::AlignmentMismatch {
                alignments: self.layout.alignments.len(),
                columns: data.column_count(),
            });
        }

        self.title_block(session);
        self.header_row(session, data.header());
        self.body_rows(session, data.body());
        self.image(session);
        Ok(())
    }

    /// Renders `data` into a PDF document.
    pub fn render_pdf(&self, data: &Dataset, setup: PageSetup) -> Result<Vec<u8>, ReportError> {
        let mut session = RenderSession::new(PdfBackend::new(self.layout.title.as_str()), setup);
        self.render(&mut session, data)?;
        Ok(session.finish()?)
    }

    fn title_block<B: DocumentBackend>(&self, session: &mut RenderSession<B>) {
        let layout = &self.layout;
        let (width, height) = layout.title_cell;

        session.add_page();
        session.set_font(layout.title_font.clone());
        session.draw_cell(&CellSpec::new(width, height).with_text(layout.title.as_str()));
        session.new_line(layout.title_gap);

        session.set_font(layout.date_font.clone());
        session.draw_cell(&CellSpec::new(width, height).with_text(layout.date_line.as_str()));
        session.new_line(layout.date_gap);
    }

    fn header_row<B: DocumentBackend>(&self, session: &mut RenderSession<B>, header: &[String]) {
        let layout = &self.layout;
        session.set_font(layout.header_font.clone());
        session.set_fill_color(layout.header_fill);
        for field in header {
            session.draw_cell(
                &CellSpec::new(layout.column_width, layout.row_height)
                    .with_text(field.as_str())
                    .bordered()
                    .filled(),
            );
        }
        session.new_line(LineHeight::Auto);
    }

    fn body_rows<B: DocumentBackend>(&self, session: &mut RenderSession<B>, rows: &[Vec<String>]) {
        let layout = &self.layout;
        session.set_font(layout.body_font.clone());
        session.set_fill_color(layout.body_fill);
        for row in rows {
            session.page_break_if_needed(layout.row_height);
            for (field, align) in row.iter().zip(&layout.alignments) {
                session.draw_cell(
                    &CellSpec::new(layout.column_width, layout.row_height)
                        .with_text(field.as_str())
                        .with_alignment(*align)
                        .bordered(),
                );
            }
            session.new_line(LineHeight::Auto);
        }
    }

    fn image<B: DocumentBackend>(&self, session: &mut RenderSession<B>) {
        if let Some(placement) = &self.layout.image {
            session.place_image(&placement.source, placement.rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{default_alignments, format_date, LayoutError, ReportBuilder, ReportLayout};
    use crate::backend::RecordingBackend;
    use crate::dataset::Dataset;
    use crate::geometry::PageSetup;
    use crate::session::RenderSession;
    use crate::style::HorizontalAlignment;

    #[test]
    fn formats_dates_like_the_classic_report() {
        let date = NaiveDate::from_ymd_opt(2006, 1, 2).expect("valid date");
        assert_eq!(format_date(date), "Mon Jan 2, 2006");
    }

    #[test]
    fn default_alignments_pad_with_left() {
        assert_eq!(
            default_alignments(3),
            vec![
                HorizontalAlignment::Left,
                HorizontalAlignment::Center,
                HorizontalAlignment::Left
            ]
        );
        let wide = default_alignments(8);
        assert_eq!(wide[5], HorizontalAlignment::Right);
        assert_eq!(wide[7], HorizontalAlignment::Left);
    }

    #[test]
    fn mismatched_alignments_are_rejected_before_drawing() {
        let data = Dataset::from_rows([["A", "B"]]).expect("dataset");
        let builder = ReportBuilder::new(ReportLayout::default());
        let mut session = RenderSession::new(RecordingBackend::new(), PageSetup::default());

        let result = builder.render(&mut session, &data);
        assert_eq!(
            result,
            Err(LayoutError::AlignmentMismatch {
                alignments: 6,
                columns: 2
            })
        );
        assert!(session.backend().ops().is_empty());
    }
}
