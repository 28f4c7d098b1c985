use std::sync::Arc;

use ecotrace_core::FeatureVector;

use crate::result::AiError;

/// An opaque, pre-trained regression model.
///
/// The model receives features ordered exactly as trained
/// (`Transport_km, Electricity_kWh, Diet_Type, Waste_kg`) and returns one
/// scalar on the `log1p` scale it was trained on. Implementations may be a
/// linear model, a tree ensemble, a remote call: the pipeline does not care.
///
/// Implementations must be safe to call concurrently and must not mutate
/// shared state from `infer`.
pub trait RegressionModel: Send + Sync + 'static {
    /// Identifier used in logs and result metadata.
    fn name(&self) -> &str;

    /// Run inference for one feature vector.
    fn infer(&self, features: &FeatureVector) -> Result<f64, AiError>;
}

/// Read-only handle to a loaded model, shared by every request.
pub type SharedModel = Arc<dyn RegressionModel>;
