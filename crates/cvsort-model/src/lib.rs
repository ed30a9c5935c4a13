//! Adapter for pre-trained text classifiers exported as JSON.
//!
//! The artifact describes a TF-IDF vectorizer followed by a linear decision
//! function, i.e. what a scikit-learn `TfidfVectorizer` + `LinearSVC` /
//! `LogisticRegression` pipeline reduces to once its fitted parameters are
//! dumped. The model is loaded once and is read-only afterwards.

use std::path::{Path, PathBuf};

use thiserror::Error;

use cvsort_core::{ClassifierError, LabelClassifier};

pub mod artifact;
pub mod vectorizer;

pub use artifact::{ModelArtifact, Norm};
pub use vectorizer::Vectorizer;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// A TF-IDF + linear classifier implementing [`LabelClassifier`].
#[derive(Debug)]
pub struct LinearTextModel {
    labels: Vec<String>,
    vectorizer: Vectorizer,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    source: Option<PathBuf>,
}

impl LinearTextModel {
    /// Load and validate a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut model = Self::from_json_str(&content)?;
        model.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            labels = model.labels.len(),
            features = model.vectorizer.n_features(),
            "loaded classification model"
        );
        Ok(model)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        let vectorizer = Vectorizer::from_artifact(&artifact)?;
        Ok(Self {
            labels: artifact.labels,
            vectorizer,
            coef: artifact.coef,
            intercept: artifact.intercept,
            source: None,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Raw decision scores, one per coefficient row.
    pub fn decision_function(&self, text: &str) -> Vec<f64> {
        let features = self.vectorizer.transform(text);
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| b + features.iter().map(|&(i, v)| row[i] * v).sum::<f64>())
            .collect()
    }

    /// Predict the label of a single text.
    pub fn predict_one(&self, text: &str) -> &str {
        let scores = self.decision_function(text);
        let index = if self.is_binary() {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        };
        &self.labels[index]
    }

    /// Two classes sharing a single coefficient row: the sign picks the class.
    fn is_binary(&self) -> bool {
        self.labels.len() == 2 && self.coef.len() == 1
    }
}

/// Index of the largest score; the first one wins ties.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

impl LabelClassifier for LinearTextModel {
    fn predict(&self, texts: &[String]) -> Result<Vec<String>, ClassifierError> {
        Ok(texts
            .iter()
            .map(|t| self.predict_one(t).to_string())
            .collect())
    }

    fn describe(&self) -> String {
        let origin = self
            .source
            .as_ref()
            .map(|p| format!(" from {}", p.display()))
            .unwrap_or_default();
        format!(
            "linear text model ({} labels, {} features){}",
            self.labels.len(),
            self.vectorizer.n_features(),
            origin
        )
    }
}
