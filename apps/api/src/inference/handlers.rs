//! Axum route handlers for the inference API.

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::inference::features::{normalize, JobPosting};
use crate::inference::metrics::ModelMetrics;
use crate::inference::predictor::{predict, PredictionResult};
use crate::state::AppState;

/// POST /predict
///
/// Form-encoded job posting → fraud verdict. The model check runs before the
/// body is looked at, so an unloaded service answers "Model not loaded" for
/// any input. Fields are read as raw pairs so repeated keys keep their first
/// value instead of failing the request.
pub async fn handle_predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let classifier = state.model.classifier()?;
    let Form(pairs) = form.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let posting = JobPosting::from_pairs(pairs);

    let features = normalize(&posting);
    let result = tokio::task::spawn_blocking(move || predict(classifier.as_ref(), &features))
        .await
        .map_err(anyhow::Error::from)??;

    debug!(
        prediction = result.prediction,
        confidence_fraudulent = result.confidence_fraudulent,
        risk_level = ?result.risk_level,
        "Prediction served"
    );

    Ok(Json(result))
}

/// GET /model_info
///
/// Echoes the evaluation metrics loaded at startup.
pub async fn handle_model_info(
    State(state): State<AppState>,
) -> Result<Json<ModelMetrics>, AppError> {
    let metrics = state.model.metrics()?;
    Ok(Json(metrics.clone()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::inference::classifier::Classifier;
    use crate::inference::predictor::tests::{FailingClassifier, StubClassifier};
    use crate::routes::build_router;
    use crate::state::ModelState;

    use super::*;

    fn legitimate_job() -> Vec<(&'static str, &'static str)> {
        vec![
            ("job_title", "Software Engineer"),
            ("location", "San Francisco, CA"),
            ("industry", "Technology"),
            ("salary_range", "80000-120000"),
            ("company_profile", "Established tech company with 500+ employees"),
            ("employment_type", "Full-Time"),
            ("job_desc", "We are looking for a skilled software engineer to join our development team. You will work on building scalable web applications using modern technologies."),
            ("skills_desc", "Bachelor's degree in Computer Science, 3+ years experience with Python, JavaScript, SQL. Experience with cloud platforms preferred."),
            ("text", "Competitive salary, health benefits, 401k matching, flexible work arrangements."),
        ]
    }

    fn suspicious_job() -> Vec<(&'static str, &'static str)> {
        vec![
            ("job_title", "Data Entry Specialist"),
            ("location", "Remote"),
            ("industry", "Various"),
            ("salary_range", "5000-10000"),
            ("company_profile", "New company established 2023"),
            ("employment_type", "Part-Time"),
            ("job_desc", "Easy work from home opportunity! Earn $5000 per week immediately! No experience required! Just basic computer skills needed!"),
            ("skills_desc", "Basic knowledge required. No degree needed. Flexible schedule."),
            ("text", "Earn money fast! Work from home! No experience needed! Contact us now!"),
        ]
    }

    fn ready(classifier: impl Classifier + 'static, metrics: Option<ModelMetrics>) -> Router {
        build_router(AppState {
            config: Config::default(),
            model: ModelState::Ready {
                classifier: Arc::new(classifier),
                metrics: metrics.map(Arc::new),
                loaded_at: Utc::now(),
            },
        })
    }

    fn unloaded() -> Router {
        build_router(AppState {
            config: Config::default(),
            model: ModelState::Unloaded,
        })
    }

    fn sample_metrics() -> ModelMetrics {
        ModelMetrics {
            auc_score: 0.9612,
            confusion_matrix: [[3380, 23], [45, 128]],
        }
    }

    fn form_request(fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_legitimate_sample_end_to_end() {
        let app = ready(
            StubClassifier {
                label: 0,
                proba: [0.85, 0.15],
            },
            None,
        );
        let (status, body) = send(app, form_request(&legitimate_job())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "prediction": 0,
                "prediction_text": "Legitimate",
                "confidence_legitimate": 85.0,
                "confidence_fraudulent": 15.0,
                "risk_level": "Low"
            })
        );
    }

    #[tokio::test]
    async fn test_suspicious_sample_end_to_end() {
        let app = ready(
            StubClassifier {
                label: 1,
                proba: [0.1, 0.9],
            },
            None,
        );
        let (status, body) = send(app, form_request(&suspicious_job())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "prediction": 1,
                "prediction_text": "Fraudulent",
                "confidence_legitimate": 10.0,
                "confidence_fraudulent": 90.0,
                "risk_level": "High"
            })
        );
    }

    #[tokio::test]
    async fn test_empty_form_still_predicts() {
        let app = ready(
            StubClassifier {
                label: 0,
                proba: [0.6, 0.4],
            },
            None,
        );
        let (status, body) = send(app, form_request(&[])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk_level"], "Medium");
    }

    #[tokio::test]
    async fn test_repeated_field_keeps_first_value() {
        let app = ready(
            StubClassifier {
                label: 1,
                proba: [0.1, 0.9],
            },
            None,
        );
        let request = form_request(&[("job_title", "A"), ("job_title", "B")]);
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction_text"], "Fraudulent");
        assert_eq!(body["risk_level"], "High");
    }

    #[tokio::test]
    async fn test_posting_larger_than_two_megabytes_is_accepted() {
        let app = ready(
            StubClassifier {
                label: 0,
                proba: [0.85, 0.15],
            },
            None,
        );
        let long_text = "a".repeat(3 * 1024 * 1024);
        let (status, body) = send(app, form_request(&[("text", long_text.as_str())])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], 0);
    }

    #[tokio::test]
    async fn test_predict_without_model_returns_500() {
        let (status, body) = send(unloaded(), form_request(&legitimate_job())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Model not loaded"}));
    }

    #[tokio::test]
    async fn test_classifier_fault_returns_500_with_message() {
        let app = ready(FailingClassifier, None);
        let (status, body) = send(app, form_request(&suspicious_job())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Classifier failure: probability model crashed"})
        );
    }

    #[tokio::test]
    async fn test_wrong_content_type_returns_500_json() {
        let app = ready(
            StubClassifier {
                label: 0,
                proba: [0.5, 0.5],
            },
            None,
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"job_title":"x"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_model_info_after_load() {
        let app = ready(
            StubClassifier {
                label: 0,
                proba: [1.0, 0.0],
            },
            Some(sample_metrics()),
        );
        let (status, body) = send(app, get("/model_info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"auc_score": 0.9612, "confusion_matrix": [[3380, 23], [45, 128]]})
        );
    }

    #[tokio::test]
    async fn test_model_info_without_metrics_returns_500() {
        let app = ready(
            StubClassifier {
                label: 0,
                proba: [1.0, 0.0],
            },
            None,
        );
        let (status, body) = send(app, get("/model_info")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Model results not available"}));
    }

    #[tokio::test]
    async fn test_model_info_when_unloaded_returns_500() {
        let (status, body) = send(unloaded(), get("/model_info")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("error").is_some());
    }
}
