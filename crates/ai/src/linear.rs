use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use ecotrace_core::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

use crate::model::RegressionModel;
use crate::result::AiError;

/// Serialized form of a linear regression model.
///
/// ```json
/// {
///   "name": "footprint-linear-2024",
///   "feature_names": ["Transport_km", "Electricity_kWh", "Diet_Type", "Waste_kg"],
///   "intercept": 3.1,
///   "coefficients": [0.004, 0.002, 0.35, 0.03]
/// }
/// ```
///
/// `feature_names` must equal the encoder's column order; an artifact trained
/// on a different layout is refused at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearArtifact {
    name: String,
    feature_names: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

/// Linear model on the `log1p` target: `intercept + Σ coefficient_i × feature_i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: String,
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
}

impl LinearModel {
    pub fn new(
        name: impl Into<String>,
        intercept: f64,
        coefficients: [f64; FEATURE_COUNT],
    ) -> Result<Self, AiError> {
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AiError::ModelLoad(
                "intercept and coefficients must be finite numbers".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            intercept,
            coefficients,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, AiError> {
        let artifact: LinearArtifact = serde_json::from_str(json)
            .map_err(|e| AiError::ModelLoad(format!("malformed artifact: {e}")))?;

        if artifact.feature_names.len() != FEATURE_COUNT
            || artifact.feature_names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
        {
            return Err(AiError::ModelLoad(format!(
                "artifact feature_names {:?} do not match expected order {:?}",
                artifact.feature_names, FEATURE_NAMES
            )));
        }

        let coefficients: [f64; FEATURE_COUNT] =
            artifact.coefficients.as_slice().try_into().map_err(|_| {
                AiError::ModelLoad(format!(
                    "expected {FEATURE_COUNT} coefficients, found {}",
                    artifact.coefficients.len()
                ))
            })?;

        Self::new(artifact.name, artifact.intercept, coefficients)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AiError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AiError::ModelLoad(format!("cannot read {}: {e}", path.display())))?;
        let model = Self::from_json_str(&json)?;
        info!(model = %model.name, path = %path.display(), "loaded linear footprint model");
        Ok(model)
    }

    pub fn to_json(&self) -> Result<String, AiError> {
        let artifact = LinearArtifact {
            name: self.name.clone(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            intercept: self.intercept,
            coefficients: self.coefficients.to_vec(),
        };
        serde_json::to_string_pretty(&artifact).map_err(|e| AiError::ModelLoad(e.to_string()))
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }
}

impl RegressionModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn infer(&self, features: &FeatureVector) -> Result<f64, AiError> {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.as_array())
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }
}
