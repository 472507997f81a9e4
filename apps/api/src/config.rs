use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Serialized classifier artifact.
    pub model_path: PathBuf,
    /// Evaluation metrics record (AUC + confusion matrix).
    pub metrics_path: PathBuf,
    /// Abort startup instead of serving `Unloaded` when the classifier fails to load.
    pub require_model: bool,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: PathBuf::from("artifacts/fraud_detection_model.json"),
            metrics_path: PathBuf::from("artifacts/model_results.json"),
            require_model: false,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: match std::env::var("PORT") {
                Ok(raw) => raw
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                Err(_) => defaults.port,
            },
            model_path: std::env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            metrics_path: std::env::var("METRICS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.metrics_path),
            require_model: match std::env::var("REQUIRE_MODEL") {
                Ok(raw) => parse_flag(&raw).context("REQUIRE_MODEL must be a boolean")?,
                Err(_) => defaults.require_model,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}
