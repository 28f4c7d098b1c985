use std::sync::Arc;
use std::time::Duration;

use ecotrace_advice::SuggestionConfig;
use ecotrace_ai::{AiError, LinearModel, RegressionModel, SharedModel};
use ecotrace_api::app::{build_app, AppState};
use ecotrace_core::FeatureVector;
use ecotrace_pipeline::FootprintPipeline;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(model: Option<SharedModel>, timeout: Duration) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let config = SuggestionConfig::default();
        let pipeline = FootprintPipeline::from_config(model, &config).unwrap();
        let app = build_app(AppState::new(pipeline, config, timeout));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_linear_model() -> Self {
        let model = LinearModel::new("test-linear", 3.0, [0.004, 0.002, 0.35, 0.03]).unwrap();
        Self::spawn(Some(Arc::new(model)), Duration::from_secs(2)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct SlowModel(Duration);

impl RegressionModel for SlowModel {
    fn name(&self) -> &str {
        "slow"
    }

    fn infer(&self, _features: &FeatureVector) -> Result<f64, AiError> {
        std::thread::sleep(self.0);
        Ok(1.0)
    }
}

struct BrokenModel;

impl RegressionModel for BrokenModel {
    fn name(&self) -> &str {
        "broken"
    }

    fn infer(&self, _features: &FeatureVector) -> Result<f64, AiError> {
        Err(AiError::InferenceFailed("booster corrupted".to_string()))
    }
}

async fn post_footprint(srv: &TestServer, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/v1/footprint", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_public_and_carries_request_id() {
    let srv = TestServer::with_linear_model().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let request_id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn high_usage_submission_returns_prediction_breakdown_and_suggestions() {
    let srv = TestServer::with_linear_model().await;

    let res = post_footprint(
        &srv,
        json!({
            "transport_km": 200,
            "electricity_kWh": "300",
            "diet": "Non-Vegetarian",
            "waste_kg": 15
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let header_id = res.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
    let body: serde_json::Value = res.json().await.unwrap();

    assert_eq!(body["request_id"], header_id);
    assert_eq!(body["model"], "test-linear");
    assert_eq!(body["footprint_kgco2_rounded"], 180.27);
    assert_eq!(body["breakdown"]["shares"].as_array().unwrap().len(), 4);

    let categories: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["transport", "electricity", "diet", "waste"]);
    assert!(body["suggestions"].as_array().unwrap().iter().all(|s| s["severity"] == "high"));
}

#[tokio::test]
async fn zero_vegetarian_submission_is_already_sustainable() {
    let srv = TestServer::with_linear_model().await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 0, "electricity_kWh": 0, "diet": "Vegetarian", "waste_kg": 0 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["message"], ecotrace_advice::ALREADY_SUSTAINABLE);
}

#[tokio::test]
async fn invalid_input_names_the_field() {
    let srv = TestServer::with_linear_model().await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 10, "electricity_kWh": -4, "diet": "Vegetarian", "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["field"], "electricity_kWh");
    assert_eq!(body["reason"]["kind"], "negative");
}

#[tokio::test]
async fn unknown_diet_is_rejected() {
    let srv = TestServer::with_linear_model().await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 10, "electricity_kWh": 4, "diet": "Pescatarian", "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["field"], "diet");
}

#[tokio::test]
async fn wrongly_typed_fields_are_reported_as_invalid_input() {
    let srv = TestServer::with_linear_model().await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": true, "electricity_kWh": 4, "diet": "Vegetarian", "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["field"], "transport_km");
    assert_eq!(body["reason"]["kind"], "not_a_number");

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 1, "electricity_kWh": 4, "diet": 1, "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["field"], "diet");
    assert_eq!(body["reason"]["kind"], "unknown_diet");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let srv = TestServer::with_linear_model().await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/footprint", srv.base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "malformed_request");
}

#[tokio::test]
async fn missing_model_reports_unavailable_without_a_number() {
    let srv = TestServer::spawn(None, Duration::from_secs(2)).await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 1, "electricity_kWh": 1, "diet": "Vegetarian", "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "estimation_unavailable");
    assert!(body.get("prediction").is_none());

    let ready = reqwest::get(format!("{}/ready", srv.base_url)).await.unwrap();
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn failing_model_reports_unavailable() {
    let srv = TestServer::spawn(Some(Arc::new(BrokenModel)), Duration::from_secs(2)).await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 1, "electricity_kWh": 1, "diet": "Vegetarian", "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("footprint_kgco2_rounded").is_none());
}

#[tokio::test]
async fn slow_inference_hits_the_call_site_timeout() {
    let model = Arc::new(SlowModel(Duration::from_millis(500)));
    let srv = TestServer::spawn(Some(model), Duration::from_millis(50)).await;

    let res = post_footprint(
        &srv,
        json!({ "transport_km": 1, "electricity_kWh": 1, "diet": "Vegetarian", "waste_kg": 1 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn config_endpoint_exposes_thresholds() {
    let srv = TestServer::with_linear_model().await;

    let res = reqwest::get(format!("{}/api/v1/config", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["model_available"], true);
    assert_eq!(body["transport_km"]["high_threshold"], 150.0);
    assert_eq!(body["sustainable_average_kgco2"], 250.0);
    assert_eq!(body["breakdown"]["version"], "heuristic-v1");
}
