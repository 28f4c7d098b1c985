use serde::Serialize;
use thiserror::Error;

use ecotrace_core::ValueObject;

/// Output of one footprint inference.
///
/// `log_value` is the raw model output (the model was trained on
/// `ln(1 + kgCO₂)`); `footprint_kgco2` is `expm1(log_value)`. Nothing is
/// clamped: a model may emit a negative log value, giving a footprint just
/// below zero. Use [`Prediction::is_below_zero`] to detect that case.
///
/// [`Prediction::from_log_value`] is the only constructor, so the two fields
/// always agree.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Prediction {
    log_value: f64,
    footprint_kgco2: f64,
}

impl ValueObject for Prediction {}

impl Prediction {
    /// Undo the training-time `log1p` transform.
    ///
    /// Fails when the model output is not finite, or when `expm1` overflows.
    pub fn from_log_value(log_value: f64) -> Result<Self, AiError> {
        if !log_value.is_finite() {
            return Err(AiError::InferenceFailed(format!(
                "model produced a non-finite value ({log_value})"
            )));
        }

        let footprint_kgco2 = log_value.exp_m1();
        if !footprint_kgco2.is_finite() {
            return Err(AiError::InferenceFailed(format!(
                "model output {log_value} overflows when inverse-transformed"
            )));
        }

        Ok(Self {
            log_value,
            footprint_kgco2,
        })
    }

    pub fn log_value(&self) -> f64 {
        self.log_value
    }

    pub fn footprint_kgco2(&self) -> f64 {
        self.footprint_kgco2
    }

    /// True when the model's log output was negative.
    pub fn is_below_zero(&self) -> bool {
        self.footprint_kgco2 < 0.0
    }

    /// Footprint rounded to two decimals, for display.
    pub fn rounded_kgco2(&self) -> f64 {
        (self.footprint_kgco2 * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AiError {
    /// No model has been injected, or the model is not ready to serve.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model raised, or returned something that is not a usable number.
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    /// A serialized model could not be read or does not match the feature layout.
    #[error("model load failed: {0}")]
    ModelLoad(String),
}
