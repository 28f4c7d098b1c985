use serde::Serialize;
use uuid::Uuid;

use ecotrace_advice::SuggestionConfig;
use ecotrace_pipeline::FootprintResult;

// -------------------------
// Response DTOs
// -------------------------

/// Body of a successful `POST /api/v1/footprint`.
#[derive(Debug, Serialize)]
pub struct FootprintResponse {
    pub request_id: Uuid,
    pub model: Option<String>,
    /// Footprint rounded to two decimals, as displayed to the user.
    pub footprint_kgco2_rounded: f64,
    #[serde(flatten)]
    pub result: FootprintResult,
}

impl FootprintResponse {
    pub fn new(request_id: Uuid, model: Option<String>, result: FootprintResult) -> Self {
        Self {
            request_id,
            model,
            footprint_kgco2_rounded: result.prediction().rounded_kgco2(),
            result,
        }
    }
}

/// Body of `GET /api/v1/config`.
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub model_available: bool,
    #[serde(flatten)]
    pub config: &'a SuggestionConfig,
}
