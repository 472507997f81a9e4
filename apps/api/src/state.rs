use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::errors::AppError;
use crate::inference::classifier::Classifier;
use crate::inference::metrics::ModelMetrics;

/// Load-once model state. Built at startup, never mutated afterwards.
#[derive(Clone)]
pub enum ModelState {
    /// Classifier artifact missing or unreadable. Every request fails.
    Unloaded,
    /// Classifier available. Metrics may be absent on their own.
    Ready {
        classifier: Arc<dyn Classifier>,
        metrics: Option<Arc<ModelMetrics>>,
        loaded_at: DateTime<Utc>,
    },
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready { .. })
    }

    pub fn classifier(&self) -> Result<Arc<dyn Classifier>, AppError> {
        match self {
            ModelState::Ready { classifier, .. } => Ok(Arc::clone(classifier)),
            ModelState::Unloaded => Err(AppError::ModelNotLoaded),
        }
    }

    pub fn metrics(&self) -> Result<&ModelMetrics, AppError> {
        match self {
            ModelState::Ready {
                metrics: Some(metrics),
                ..
            } => Ok(metrics.as_ref()),
            _ => Err(AppError::MetricsUnavailable),
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ModelState::Ready { loaded_at, .. } => Some(*loaded_at),
            ModelState::Unloaded => None,
        }
    }
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub model: ModelState,
}
