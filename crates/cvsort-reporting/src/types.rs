use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use cvsort_core::ResumeRecord;

/// Available export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Text,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Text => "Plain Text",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!(
                "unknown export format '{}' (expected csv, json or text)",
                other
            )),
        }
    }
}

/// One exported row: what the user sees per uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow<'a> {
    pub filename: &'a str,
    pub name: &'a str,
    pub predicted_label: &'a str,
}

impl<'a> From<&'a ResumeRecord> for ResultRow<'a> {
    fn from(r: &'a ResumeRecord) -> Self {
        Self {
            filename: &r.filename,
            name: &r.resolved_name,
            predicted_label: r.final_label(),
        }
    }
}

/// Rows for a finished batch, in batch order.
pub fn result_rows(records: &[ResumeRecord]) -> Vec<ResultRow<'_>> {
    records.iter().map(ResultRow::from).collect()
}
