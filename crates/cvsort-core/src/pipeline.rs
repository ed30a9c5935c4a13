//! Batch orchestration: extraction, name resolution, classification and the
//! internship override, in input order.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    ClassifierError, LabelClassifier, ProgressEvent, ResumeRecord, TextExtractor, Upload,
};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),
    #[error("classifier returned {got} labels for {expected} resumes")]
    LengthMismatch { expected: usize, got: usize },
}

/// Extract text from every upload and build its pre-classification record.
///
/// Never fails: extraction problems surface as empty text, which the name
/// resolver turns into the not-found sentinel.
pub fn extract_records(
    extractor: &dyn TextExtractor,
    uploads: &[Upload],
    mut progress: impl FnMut(ProgressEvent),
) -> Vec<ResumeRecord> {
    let total = uploads.len();
    let mut records = Vec::with_capacity(total);

    for (index, upload) in uploads.iter().enumerate() {
        progress(ProgressEvent::Extracting {
            index,
            total,
            filename: upload.filename.clone(),
        });

        let kind = upload.kind();
        let text = extractor.extract(&upload.bytes, kind);
        tracing::debug!(
            filename = %upload.filename,
            kind = kind.as_str(),
            chars = text.len(),
            "extracted text"
        );

        let record = ResumeRecord::from_text(upload.filename.clone(), text);
        progress(ProgressEvent::Extracted {
            index,
            total,
            filename: record.filename.clone(),
            chars: record.extracted_text.chars().count(),
            name: record.resolved_name.clone(),
        });
        records.push(record);
    }

    records
}

/// Label already-extracted records in place.
///
/// Texts go to the classifier in record order and predictions are consumed in
/// that same order. On any error no record is modified.
pub fn classify_records(
    classifier: &dyn LabelClassifier,
    records: &mut [ResumeRecord],
    mut progress: impl FnMut(ProgressEvent),
) -> Result<(), BatchError> {
    if records.is_empty() {
        return Ok(());
    }

    let texts: Vec<String> = records.iter().map(|r| r.extracted_text.clone()).collect();
    progress(ProgressEvent::Classifying { count: texts.len() });

    let raw_labels = classifier.predict(&texts)?;
    if raw_labels.len() != records.len() {
        return Err(BatchError::LengthMismatch {
            expected: records.len(),
            got: raw_labels.len(),
        });
    }

    for (record, raw_label) in records.iter_mut().zip(raw_labels) {
        record.apply_label(raw_label);
    }
    progress(ProgressEvent::Classified {
        count: records.len(),
    });
    Ok(())
}

/// A ready-to-run pipeline: an extractor plus a loaded classifier.
///
/// Holding a classifier is a precondition of construction, so a pipeline
/// can never start a batch without a model.
pub struct Pipeline {
    extractor: Box<dyn TextExtractor>,
    classifier: Arc<dyn LabelClassifier>,
}

impl Pipeline {
    pub fn new(extractor: Box<dyn TextExtractor>, classifier: Arc<dyn LabelClassifier>) -> Self {
        Self {
            extractor,
            classifier,
        }
    }

    pub fn classifier(&self) -> &dyn LabelClassifier {
        self.classifier.as_ref()
    }

    /// Process one batch to completion.
    ///
    /// Returns one fully labeled record per upload, in upload order. A
    /// classifier failure aborts the whole batch and discards everything
    /// extracted so far.
    pub fn run(
        &self,
        uploads: &[Upload],
        mut progress: impl FnMut(ProgressEvent),
    ) -> Result<Vec<ResumeRecord>, BatchError> {
        tracing::info!(files = uploads.len(), "starting batch");

        let mut records = extract_records(self.extractor.as_ref(), uploads, &mut progress);
        classify_records(self.classifier.as_ref(), &mut records, &mut progress)?;

        tracing::info!(files = records.len(), "batch complete");
        Ok(records)
    }
}
