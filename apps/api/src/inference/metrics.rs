//! Evaluation metrics echoed by `GET /model_info`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::inference::artifacts::{read_json, ArtifactError};
use crate::inference::predictor::round_to;

/// Raw record as written by the evaluation run.
#[derive(Debug, Deserialize)]
struct MetricsRecord {
    auc_score: f64,
    confusion_matrix: Vec<Vec<i64>>,
}

/// AUC (4 decimals) and the 2×2 confusion matrix `[[tn, fp], [fn, tp]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub auc_score: f64,
    pub confusion_matrix: [[u64; 2]; 2],
}

impl ModelMetrics {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let record: MetricsRecord = read_json(path)?;
        Self::from_record(record)
    }

    fn from_record(record: MetricsRecord) -> Result<Self, ArtifactError> {
        if !record.auc_score.is_finite() {
            return Err(ArtifactError::Schema("auc_score is not finite".to_string()));
        }

        Ok(Self {
            auc_score: round_to(record.auc_score, 4),
            confusion_matrix: to_matrix(&record.confusion_matrix)?,
        })
    }
}

fn to_matrix(rows: &[Vec<i64>]) -> Result<[[u64; 2]; 2], ArtifactError> {
    let shape_error = || {
        ArtifactError::Schema(format!(
            "confusion_matrix must be 2x2, got {} rows",
            rows.len()
        ))
    };

    if rows.len() != 2 || rows.iter().any(|row| row.len() != 2) {
        return Err(shape_error());
    }

    let mut matrix = [[0u64; 2]; 2];
    for (i, row) in rows.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            matrix[i][j] = u64::try_from(count).map_err(|_| {
                ArtifactError::Schema(format!("confusion_matrix[{i}][{j}] is negative: {count}"))
            })?;
        }
    }
    Ok(matrix)
}
