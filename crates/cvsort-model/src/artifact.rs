use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Default token pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Vector normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// On-disk JSON model structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Class labels, in coefficient-row order.
    pub labels: Vec<String>,
    /// Term (or space-joined n-gram) -> feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
    /// One row per label, or a single row for a binary model.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub token_pattern: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl ModelArtifact {
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Check that every array agrees on the label and feature dimensions.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n_features = self.n_features();
        let invalid = |msg: String| Err(ModelError::Invalid(msg));

        if self.labels.is_empty() {
            return invalid("no labels".into());
        }
        let binary = self.labels.len() == 2 && self.coef.len() == 1;
        if !binary && self.coef.len() != self.labels.len() {
            return invalid(format!(
                "{} coefficient rows for {} labels",
                self.coef.len(),
                self.labels.len()
            ));
        }
        if self.intercept.len() != self.coef.len() {
            return invalid(format!(
                "{} intercepts for {} coefficient rows",
                self.intercept.len(),
                self.coef.len()
            ));
        }
        if let Some((row, len)) = self
            .coef
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n_features)
        {
            return invalid(format!(
                "coefficient row {} has {} weights, expected {}",
                row, len, n_features
            ));
        }
        if let Some((term, &index)) = self.vocabulary.iter().find(|&(_, &i)| i >= n_features) {
            return invalid(format!(
                "vocabulary term {:?} has index {} beyond {} features",
                term, index, n_features
            ));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return invalid(format!("bad ngram_range ({}, {})", min_n, max_n));
        }
        Ok(())
    }
}
