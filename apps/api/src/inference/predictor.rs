//! Predictor — runs the classifier on one feature row and maps the output to
//! the `/predict` response payload.

use serde::Serialize;

use crate::inference::classifier::{Classifier, ClassifierError};
use crate::inference::features::FeatureVector;

/// Fraud confidence (percent) above which a posting is High risk.
pub const HIGH_RISK_ABOVE: f64 = 70.0;
/// Fraud confidence (percent) above which a posting is Medium risk.
pub const MEDIUM_RISK_ABOVE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Strict ladder: exactly 70 is Medium, exactly 30 is Low.
    pub fn from_confidence(confidence_fraudulent: f64) -> Self {
        if confidence_fraudulent > HIGH_RISK_ABOVE {
            RiskLevel::High
        } else if confidence_fraudulent > MEDIUM_RISK_ABOVE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub prediction_text: String,
    pub confidence_legitimate: f64,
    pub confidence_fraudulent: f64,
    pub risk_level: RiskLevel,
}

pub fn prediction_text(prediction: u8) -> &'static str {
    if prediction == 1 {
        "Fraudulent"
    } else {
        "Legitimate"
    }
}

/// Rounds to `decimals` places from the exact binary value, ties to even
/// (12.125 → 12.12).
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Label and probabilities come from the same feature row. Any classifier
/// fault is returned as-is; nothing partial is produced.
pub fn predict(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<PredictionResult, ClassifierError> {
    let prediction = classifier.classify(features)?;
    let [p_legitimate, p_fraudulent] = classifier.classify_proba(features)?;

    for p in [p_legitimate, p_fraudulent] {
        if !p.is_finite() {
            return Err(ClassifierError::InvalidProbability(p));
        }
    }

    let confidence_legitimate = p_legitimate * 100.0;
    let confidence_fraudulent = p_fraudulent * 100.0;

    Ok(PredictionResult {
        prediction,
        prediction_text: prediction_text(prediction).to_string(),
        confidence_legitimate: round_to(confidence_legitimate, 2),
        confidence_fraudulent: round_to(confidence_fraudulent, 2),
        risk_level: RiskLevel::from_confidence(confidence_fraudulent),
    })
}
