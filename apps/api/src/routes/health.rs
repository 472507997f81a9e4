use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether the model artifacts are loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "fraudscan-api",
        "model_loaded": state.model.is_ready(),
        "metrics_loaded": state.model.metrics().is_ok(),
        "loaded_at": state.model.loaded_at().map(|t| t.to_rfc3339()),
        "model_path": state.config.model_path.display().to_string(),
    }))
}
