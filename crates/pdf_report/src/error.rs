//! Crate-wide error type.

use crate::dataset::DatasetError;
use crate::fault::Fault;
use crate::output::OutputError;
use crate::report::LayoutError;

/// Any failure between reading a dataset and writing its report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to load report data")]
    Dataset(#[from] DatasetError),
    #[error("invalid report layout")]
    Layout(#[from] LayoutError),
    #[error("failed creating PDF report")]
    Render(#[from] Fault),
    #[error("cannot save PDF")]
    Output(#[from] OutputError),
}
