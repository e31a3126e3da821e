use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use pdf_report::app;

/// Renders a CSV file as the daily orders report.
///
/// The report is written to `report.pdf` in the working directory, with `stats.png` from the same
/// directory placed in the top-right corner of the last page.  Set `RUST_LOG=debug` to follow
/// page breaks.
#[derive(Parser)]
#[command(author, version, about = "Render a CSV table as a PDF report")]
struct Cli {
    /// CSV file whose first row is the table header.
    #[arg(default_value = app::DEFAULT_INPUT)]
    input: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = app::run(&cli.input, app::DEFAULT_OUTPUT) {
        log::error!("report generation failed for {}", cli.input.display());
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
