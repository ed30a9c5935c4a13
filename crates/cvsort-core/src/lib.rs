use std::collections::BTreeMap;

pub mod backend;
pub mod classifier;
pub mod config_file;
pub mod label;
pub mod mock;
pub mod name;
pub mod pipeline;

// Re-export for convenience
pub use backend::{BackendError, DocumentBackend, FileKind, TextExtractor};
pub use classifier::{ClassifierError, LabelClassifier};
pub use label::{INTERNSHIP_LABEL, is_internship_filename, resolve_label};
pub use name::{NOT_FOUND, resolve_name};
pub use pipeline::{BatchError, Pipeline, classify_records, extract_records};

/// A single input file as handed to the pipeline.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Display filename (final path component), used for the kind and internship checks.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_filename(&self.filename)
    }
}

/// Per-file state for one batch run.
///
/// `raw_label` and `final_label` stay `None` until the classifier has run;
/// a batch returned by [`Pipeline::run`] always has both populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRecord {
    pub filename: String,
    pub extracted_text: String,
    pub resolved_name: String,
    pub is_internship_filename: bool,
    pub raw_label: Option<String>,
    pub final_label: Option<String>,
}

impl ResumeRecord {
    /// Build the pre-classification record for an upload's extracted text.
    pub fn from_text(filename: impl Into<String>, extracted_text: String) -> Self {
        let filename = filename.into();
        let resolved_name = resolve_name(&extracted_text);
        let is_internship_filename = is_internship_filename(&filename);
        Self {
            filename,
            extracted_text,
            resolved_name,
            is_internship_filename,
            raw_label: None,
            final_label: None,
        }
    }

    /// Record the classifier output and apply the internship override.
    pub fn apply_label(&mut self, raw_label: String) {
        self.final_label = Some(resolve_label(&raw_label, self.is_internship_filename));
        self.raw_label = Some(raw_label);
    }

    /// Whether the final label came from the filename override rather than the model.
    pub fn was_overridden(&self) -> bool {
        self.is_internship_filename && self.final_label.is_some()
    }

    pub fn name_found(&self) -> bool {
        self.resolved_name != NOT_FOUND
    }

    /// The label shown to the user, or `""` before classification.
    pub fn final_label(&self) -> &str {
        self.final_label.as_deref().unwrap_or("")
    }
}

/// Progress events emitted during a batch run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Extracting {
        index: usize,
        total: usize,
        filename: String,
    },
    Extracted {
        index: usize,
        total: usize,
        filename: String,
        chars: usize,
        name: String,
    },
    Classifying {
        count: usize,
    },
    Classified {
        count: usize,
    },
}

/// Summary statistics for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub names_found: usize,
    pub names_not_found: usize,
    pub empty_text: usize,
    pub internship_overrides: usize,
    /// Final label -> number of records carrying it.
    pub label_counts: BTreeMap<String, usize>,
}

impl BatchStats {
    pub fn from_records(records: &[ResumeRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Default::default()
        };
        for r in records {
            if r.name_found() {
                stats.names_found += 1;
            } else {
                stats.names_not_found += 1;
            }
            if r.extracted_text.trim().is_empty() {
                stats.empty_text += 1;
            }
            if r.was_overridden() {
                stats.internship_overrides += 1;
            }
            if let Some(label) = &r.final_label {
                *stats.label_counts.entry(label.clone()).or_default() += 1;
            }
        }
        stats
    }
}
