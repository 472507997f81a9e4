//! Classifier — the opaque binary model behind `/predict`.
//!
//! Handlers only see `Arc<dyn Classifier>`. The shipped backend is
//! `LinearTextClassifier`, a bag-of-words logistic model read from a JSON
//! artifact; tests swap in a fixed-output stub.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::inference::artifacts::{read_json, ArtifactError};
use crate::inference::features::{FeatureVector, FEATURE_COLUMNS};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier produced an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("Classifier failure: {0}")]
    Failed(String),
}

/// Binary label plus class probabilities for one feature row.
///
/// `classify_proba` returns `[P(legitimate), P(fraudulent)]`; index 1 is
/// always the fraud class.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Result<u8, ClassifierError>;

    fn classify_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ClassifierError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LinearTextClassifier
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct LinearModelArtifact {
    columns: Vec<String>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default)]
    weights: HashMap<String, f64>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Logistic model over per-column token presence.
///
/// `z = intercept + Σ weights["<column>:<token>"]`, `p_fraud = sigmoid(z)`,
/// label 1 iff `p_fraud > threshold`.
#[derive(Debug, Clone)]
pub struct LinearTextClassifier {
    intercept: f64,
    threshold: f64,
    weights: HashMap<String, f64>,
}

impl LinearTextClassifier {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: LinearModelArtifact = read_json(path)?;
        Self::from_artifact(artifact)
    }

    #[cfg(test)]
    pub fn from_json(raw: &str) -> Result<Self, ArtifactError> {
        let artifact: LinearModelArtifact =
            serde_json::from_str(raw).map_err(|source| ArtifactError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: LinearModelArtifact) -> Result<Self, ArtifactError> {
        if artifact.columns != FEATURE_COLUMNS {
            return Err(ArtifactError::Schema(format!(
                "model was trained on columns {:?}, service provides {:?}",
                artifact.columns, FEATURE_COLUMNS
            )));
        }

        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(ArtifactError::Schema(format!(
                "threshold {} is outside [0, 1]",
                artifact.threshold
            )));
        }

        if !artifact.intercept.is_finite() {
            return Err(ArtifactError::Schema("intercept is not finite".to_string()));
        }

        if let Some((key, _)) = artifact.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ArtifactError::Schema(format!("weight '{key}' is not finite")));
        }

        Ok(Self {
            intercept: artifact.intercept,
            threshold: artifact.threshold,
            weights: artifact.weights,
        })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.weights.len()
    }

    fn decision(&self, features: &FeatureVector) -> f64 {
        let mut z = self.intercept;
        for (column, value) in features.columns() {
            for token in tokenize(value) {
                if let Some(w) = self.weights.get(&format!("{column}:{token}")) {
                    z += w;
                }
            }
        }
        z
    }

    fn fraud_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let p = sigmoid(self.decision(features));
        if p.is_finite() {
            Ok(p)
        } else {
            Err(ClassifierError::InvalidProbability(p))
        }
    }
}

impl Classifier for LinearTextClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<u8, ClassifierError> {
        let p = self.fraud_probability(features)?;
        Ok(u8::from(p > self.threshold))
    }

    fn classify_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        let p = self.fraud_probability(features)?;
        Ok([1.0 - p, p])
    }
}

/// Lowercased alphanumeric runs of two or more characters, de-duplicated.
pub fn tokenize(value: &str) -> BTreeSet<String> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
