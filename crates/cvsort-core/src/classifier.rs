use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// An opaque, pre-trained text classifier.
///
/// `predict` must return exactly one label per input text, in input order.
/// The batch pipeline checks the length and treats a mismatch as fatal.
pub trait LabelClassifier: Send + Sync {
    fn predict(&self, texts: &[String]) -> Result<Vec<String>, ClassifierError>;

    /// Short human-readable description (artifact path, label count, ...).
    fn describe(&self) -> String {
        "classifier".to_string()
    }
}
