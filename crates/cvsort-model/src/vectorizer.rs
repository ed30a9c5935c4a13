use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;

use crate::ModelError;
use crate::artifact::{DEFAULT_TOKEN_PATTERN, ModelArtifact, Norm};

/// TF-IDF feature extraction matching the exported vocabulary.
#[derive(Debug)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    token_re: Regex,
    lowercase: bool,
    sublinear_tf: bool,
    norm: Norm,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
}

impl Vectorizer {
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ModelError> {
        let pattern = artifact
            .token_pattern
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_PATTERN);
        let token_re = Regex::new(pattern)
            .map_err(|e| ModelError::Invalid(format!("bad token_pattern: {}", e)))?;

        Ok(Self {
            vocabulary: artifact.vocabulary.clone(),
            idf: artifact.idf.clone(),
            token_re,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.iter().cloned().collect(),
        })
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Tokens after case folding and stop-word removal.
    fn tokens(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.lowercase {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };
        self.token_re
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Sparse TF-IDF vector as `(feature index, value)` pairs, sorted by index.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens = self.tokens(text);
        let (min_n, max_n) = self.ngram_range;

        // BTreeMap keeps feature order stable so float sums are reproducible.
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&gram) {
                    *counts.entry(index).or_default() += 1.0;
                }
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(i, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (i, tf * self.idf[i])
            })
            .collect();

        let norm = match self.norm {
            Norm::L2 => features.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::L1 => features.iter().map(|&(_, v)| v.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            for (_, v) in &mut features {
                *v /= norm;
            }
        }
        features
    }
}
