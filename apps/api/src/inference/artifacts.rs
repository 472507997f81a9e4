//! Startup artifact loading: the serialized classifier and the evaluation
//! metrics record. Runs once before the router is built.
//!
//! A missing or corrupt artifact never aborts the process here. The caller
//! gets back whatever loaded and decides (see `Config::require_model`).

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::inference::classifier::LinearTextClassifier;
use crate::inference::metrics::ModelMetrics;
use crate::state::ModelState;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Artifact schema mismatch: {0}")]
    Schema(String),
}

/// Reads and deserializes one JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(ArtifactError::NotFound(display));
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: display,
        source,
    })
}

/// Loads both artifacts named in `config` and builds the shared model state.
///
/// * classifier fails → `ModelState::Unloaded` (metrics are not consulted)
/// * metrics fail     → `ModelState::Ready` with `metrics: None`
pub fn load_model_state(config: &Config) -> ModelState {
    let classifier = match LinearTextClassifier::load(&config.model_path) {
        Ok(model) => {
            info!(
                path = %config.model_path.display(),
                vocabulary = model.vocabulary_len(),
                "Classifier loaded"
            );
            model
        }
        Err(e) => {
            error!(error = %e, "Error loading classifier; predictions are disabled");
            return ModelState::Unloaded;
        }
    };

    let metrics = match ModelMetrics::load(&config.metrics_path) {
        Ok(metrics) => {
            info!(
                path = %config.metrics_path.display(),
                auc = metrics.auc_score,
                "Model metrics loaded"
            );
            Some(Arc::new(metrics))
        }
        Err(e) => {
            warn!(
                error = %e,
                "Model metrics unavailable; model performance information will not be available"
            );
            None
        }
    };

    ModelState::Ready {
        classifier: Arc::new(classifier),
        metrics,
        loaded_at: Utc::now(),
    }
}
