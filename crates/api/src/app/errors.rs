use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ecotrace_pipeline::EstimationError;

/// Shown instead of a number whenever the model cannot produce one.
pub const UNAVAILABLE_MESSAGE: &str = "carbon footprint estimation is temporarily unavailable";

pub fn estimation_error_to_response(err: EstimationError) -> axum::response::Response {
    match err {
        EstimationError::InvalidInput { field, reason } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "invalid_input",
                "field": field,
                "reason": reason,
                "message": format!("{field}: {reason}"),
            })),
        )
            .into_response(),
        EstimationError::ModelUnavailable(_) | EstimationError::ModelInference(_) => {
            json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "estimation_unavailable",
                UNAVAILABLE_MESSAGE,
            )
        }
        EstimationError::Configuration(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
