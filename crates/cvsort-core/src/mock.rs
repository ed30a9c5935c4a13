//! Mock extractor and classifier for testing.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{ClassifierError, FileKind, LabelClassifier, TextExtractor};

/// A hand-rolled [`TextExtractor`] that decodes bytes as (lossy) UTF-8.
///
/// Kinds registered with [`MockExtractor::failing`] behave like a parser that
/// could not read the document and return empty text.
#[derive(Debug, Default)]
pub struct MockExtractor {
    failing: HashSet<FileKind>,
}

impl MockExtractor {
    pub fn failing(mut self, kind: FileKind) -> Self {
        self.failing.insert(kind);
        self
    }
}

impl TextExtractor for MockExtractor {
    fn extract(&self, bytes: &[u8], kind: FileKind) -> String {
        if self.failing.contains(&kind) {
            return String::new();
        }
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// A configurable response for [`MockClassifier`].
#[derive(Clone, Debug)]
pub enum MockPrediction {
    /// Return this exact label list, whatever the input length.
    Fixed(Vec<String>),
    /// Label every text with its first non-empty line (or `"Unlabeled"`).
    Echo,
    /// Fail the call with this message.
    Fail(String),
}

/// A hand-rolled [`LabelClassifier`] for tests.
///
/// Supports a fixed response or a per-call sequence (last one repeats),
/// call counting, and recording of the texts it was given.
pub struct MockClassifier {
    responses: Mutex<Vec<MockPrediction>>,
    fallback: MockPrediction,
    call_count: AtomicUsize,
    seen: Mutex<Vec<Vec<String>>>,
}

impl MockClassifier {
    /// Create a mock that always responds with `prediction`.
    pub fn new(prediction: MockPrediction) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: prediction,
            call_count: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that responds in order, repeating the last response.
    pub fn with_sequence(mut responses: Vec<MockPrediction>) -> Self {
        let fallback = responses.last().cloned().unwrap_or(MockPrediction::Echo);
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            fallback,
            call_count: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// How many times `predict()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The text batches passed to `predict()`, one entry per call.
    pub fn seen_batches(&self) -> Vec<Vec<String>> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockPrediction {
        let Ok(mut seq) = self.responses.lock() else {
            return self.fallback.clone();
        };
        seq.pop().unwrap_or_else(|| self.fallback.clone())
    }
}

impl LabelClassifier for MockClassifier {
    fn predict(&self, texts: &[String]) -> Result<Vec<String>, ClassifierError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(texts.to_vec());
        }

        match self.next_response() {
            MockPrediction::Fixed(labels) => Ok(labels),
            MockPrediction::Echo => Ok(texts
                .iter()
                .map(|t| {
                    t.lines()
                        .map(str::trim)
                        .find(|l| !l.is_empty())
                        .unwrap_or("Unlabeled")
                        .to_string()
                })
                .collect()),
            MockPrediction::Fail(msg) => Err(ClassifierError::Prediction(msg)),
        }
    }

    fn describe(&self) -> String {
        "mock classifier".to_string()
    }
}
