use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use cvsort_core::ResumeRecord;

use crate::types::{ExportFormat, ResultRow, result_rows};

/// CSV header row, also the JSON field names.
pub const CSV_HEADER: &str = "filename,name,predicted_label";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the batch in `format` and write it to `path`, replacing any existing file.
pub fn export_results(
    records: &[ResumeRecord],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let content = render(records, format)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    Ok(())
}

/// Render the batch in `format` without touching the filesystem.
pub fn render(records: &[ResumeRecord], format: ExportFormat) -> Result<String, ExportError> {
    let rows = result_rows(records);
    Ok(match format {
        ExportFormat::Csv => export_csv(&rows),
        ExportFormat::Json => export_json(&rows)?,
        ExportFormat::Text => export_text(&rows),
    })
}

pub(crate) fn csv_escape(s: &str) -> String {
    if s.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn export_csv(rows: &[ResultRow<'_>]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(row.filename),
            csv_escape(row.name),
            csv_escape(row.predicted_label),
        ));
    }
    out
}

fn export_json(rows: &[ResultRow<'_>]) -> Result<String, ExportError> {
    let mut out = serde_json::to_string_pretty(rows)?;
    out.push('\n');
    Ok(out)
}

/// Fixed-width table; column widths follow the longest cell.
fn export_text(rows: &[ResultRow<'_>]) -> String {
    const HEADERS: [&str; 3] = ["Filename", "Name", "Predicted Label"];

    let w_file = column_width(HEADERS[0], rows.iter().map(|r| r.filename));
    let w_name = column_width(HEADERS[1], rows.iter().map(|r| r.name));

    let mut out = String::new();
    let header = format!(
        "{:<w_file$}  {:<w_name$}  {}",
        HEADERS[0], HEADERS[1], HEADERS[2]
    );
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(header.trim_end().chars().count()));
    out.push('\n');
    for row in rows {
        let line = format!(
            "{:<w_file$}  {:<w_name$}  {}",
            row.filename, row.name, row.predicted_label
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .fold(header.chars().count(), usize::max)
}
