pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::inference::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        // Postings are not length-limited.
        .route(
            "/predict",
            post(handlers::handle_predict).layer(DefaultBodyLimit::disable()),
        )
        .route("/model_info", get(handlers::handle_model_info))
        .with_state(state)
}
