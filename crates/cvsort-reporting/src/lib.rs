//! Export of classified resume batches to CSV, JSON and plain text.

mod export;
mod types;

pub use export::{CSV_HEADER, ExportError, export_results, render};
pub use types::{ExportFormat, ResultRow, result_rows};
