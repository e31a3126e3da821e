//! Cursor-driven table reports rendered to PDF.
//!
//! A [`RenderSession`] turns cell, line and image calls into absolute page coordinates on a
//! [`DocumentBackend`].  Rendering problems do not interrupt the caller: the session keeps the
//! first [`Fault`] and reports it from [`RenderSession::finish`].  [`ReportBuilder`] uses the
//! session to lay out a [`Dataset`] as a titled, paginated table.
//!
//! ```no_run
//! use pdf_report::{Dataset, PageSetup, ReportBuilder, ReportLayout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = Dataset::load("ordersReport.csv")?;
//! let pdf = ReportBuilder::new(ReportLayout::default()).render_pdf(&data, PageSetup::default())?;
//! pdf_report::save_pdf(&pdf, "report.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod backend;
pub mod cell;
pub mod cursor;
pub mod dataset;
pub mod error;
pub mod fault;
pub mod fonts;
pub mod geometry;
pub mod imaging;
pub mod output;
pub mod report;
pub mod session;
pub mod style;

pub use backend::{BackendError, DocumentBackend, DrawOp, PdfBackend, RecordingBackend};
pub use cell::{Advance, CellSpec};
pub use cursor::{LayoutCursor, LineHeight};
pub use dataset::{Dataset, DatasetError};
pub use error::ReportError;
pub use fault::{Fault, FaultKind};
pub use fonts::{FontError, TtfFamily};
pub use geometry::{Margins, Orientation, PageSetup, PaperSize, Rect};
pub use imaging::ImageSource;
pub use output::{save_pdf, OutputError};
pub use report::{default_alignments, LayoutError, ReportBuilder, ReportLayout};
pub use session::RenderSession;
pub use style::{FontSpec, FontStyle, HorizontalAlignment, Rgb, Style};
