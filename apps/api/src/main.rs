mod config;
mod errors;
mod inference;
mod routes;
mod state;

use anyhow::{bail, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::inference::artifacts::load_model_state;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Fraud Detection API v{}", env!("CARGO_PKG_VERSION"));

    if !config.model_path.exists() {
        error!(
            path = %config.model_path.display(),
            "Model file not found; make sure the classifier artifact is in place"
        );
    }
    if !config.metrics_path.exists() {
        warn!(
            path = %config.metrics_path.display(),
            "Metrics file not found; model performance information will not be available"
        );
    }

    // Load classifier + metrics once; the state never changes after this
    let model = load_model_state(&config);
    if !model.is_ready() {
        if config.require_model {
            bail!(
                "Classifier could not be loaded from {} and REQUIRE_MODEL is set",
                config.model_path.display()
            );
        }
        warn!("Serving without a classifier; /predict will return \"Model not loaded\"");
    }

    let state = AppState {
        config: config.clone(),
        model,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");
    info!("Open your browser and go to: http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
