// Inference service: form fields → feature row → classifier → verdict.
// Handlers never touch the model artifact format; they go through the
// `Classifier` trait held in `AppState`.

pub mod artifacts;
pub mod classifier;
pub mod features;
pub mod handlers;
pub mod metrics;
pub mod predictor;
