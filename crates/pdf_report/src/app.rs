//! The orders report as a runnable program.

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::ReportError;
use crate::geometry::PageSetup;
use crate::imaging::ImageSource;
use crate::output;
use crate::report::{default_alignments, ReportBuilder, ReportLayout};

/// Input read when no path is given.
pub const DEFAULT_INPUT: &str = "ordersReport.csv";
/// File the report is written to.
pub const DEFAULT_OUTPUT: &str = "report.pdf";
/// Image placed in the top-right corner of the page the table ends on.
pub const DEFAULT_IMAGE: &str = "stats.png";

/// Reads `input`, renders the daily report and writes it to `output`.
///
/// The corner image is read from [`DEFAULT_IMAGE`] in the working directory.
pub fn run(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), ReportError> {
    let data = Dataset::load(input.as_ref())?;
    let layout = ReportLayout::default()
        .with_alignments(default_alignments(data.column_count()))
        .with_corner_image(ImageSource::from_path(DEFAULT_IMAGE));

    let bytes = ReportBuilder::new(layout).render_pdf(&data, PageSetup::default())?;
    output::save_pdf(&bytes, output.as_ref())?;
    log::info!(
        "wrote {} ({} bytes, {} rows)",
        output.as_ref().display(),
        bytes.len(),
        data.row_count()
    );
    Ok(())
}
