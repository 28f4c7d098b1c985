use core::fmt;

use tracing::{debug, warn};

use ecotrace_core::FeatureVector;

use crate::model::SharedModel;
use crate::result::{AiError, Prediction};

/// Turns feature vectors into footprint predictions using an injected model.
///
/// The predictor never substitutes a default value: a missing model is
/// `ModelUnavailable`, a failing model is surfaced as-is.
#[derive(Clone)]
pub struct FootprintPredictor {
    model: Option<SharedModel>,
    unavailable_reason: String,
}

impl FootprintPredictor {
    pub fn new(model: SharedModel) -> Self {
        Self {
            model: Some(model),
            unavailable_reason: String::new(),
        }
    }

    /// A predictor with no model loaded; every call fails with `ModelUnavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: None,
            unavailable_reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.name())
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, AiError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| AiError::ModelUnavailable(self.unavailable_reason.clone()))?;

        let log_value = model.infer(features).inspect_err(|err| {
            warn!(model = model.name(), error = %err, "model inference failed");
        })?;

        let prediction = Prediction::from_log_value(log_value).inspect_err(|err| {
            warn!(model = model.name(), log_value, error = %err, "model output rejected");
        })?;

        if prediction.is_below_zero() {
            warn!(
                model = model.name(),
                log_value,
                footprint_kgco2 = prediction.footprint_kgco2(),
                "model predicted a footprint below zero; passing it through unclamped"
            );
        }

        debug!(
            model = model.name(),
            log_value,
            footprint_kgco2 = prediction.footprint_kgco2(),
            "prediction complete"
        );

        Ok(prediction)
    }
}

impl fmt::Debug for FootprintPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FootprintPredictor")
            .field("model", &self.model_name())
            .field("unavailable_reason", &self.unavailable_reason)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::RegressionModel;
    use ecotrace_core::{Diet, FeatureEncoder, RawInputs};

    struct FixedLogModel(f64);

    impl RegressionModel for FixedLogModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn infer(&self, _features: &FeatureVector) -> Result<f64, AiError> {
            Ok(self.0)
        }
    }

    struct RaisingModel;

    impl RegressionModel for RaisingModel {
        fn name(&self) -> &str {
            "raising"
        }

        fn infer(&self, _features: &FeatureVector) -> Result<f64, AiError> {
            Err(AiError::InferenceFailed("tensor shape mismatch".to_string()))
        }
    }

    fn features() -> FeatureVector {
        FeatureEncoder::encode(&RawInputs::new(10.0, 20.0, Diet::Vegetarian, 1.0).unwrap())
    }

    #[test]
    fn applies_expm1_to_model_output() {
        let predictor = FootprintPredictor::new(Arc::new(FixedLogModel(120.0f64.ln_1p())));
        let prediction = predictor.predict(&features()).unwrap();
        assert!((prediction.footprint_kgco2() - 120.0).abs() < 1e-9);
        assert_eq!(prediction.log_value(), 120.0f64.ln_1p());
    }

    #[test]
    fn missing_model_is_unavailable() {
        let predictor = FootprintPredictor::unavailable("ECOTRACE_MODEL_PATH not set");
        assert!(!predictor.is_available());
        match predictor.predict(&features()).unwrap_err() {
            AiError::ModelUnavailable(reason) => assert_eq!(reason, "ECOTRACE_MODEL_PATH not set"),
            other => panic!("Expected ModelUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn model_errors_are_surfaced_unchanged() {
        let predictor = FootprintPredictor::new(Arc::new(RaisingModel));
        assert_eq!(
            predictor.predict(&features()).unwrap_err(),
            AiError::InferenceFailed("tensor shape mismatch".to_string())
        );
    }

    #[test]
    fn nan_model_output_is_not_replaced_by_a_default() {
        let predictor = FootprintPredictor::new(Arc::new(FixedLogModel(f64::NAN)));
        match predictor.predict(&features()) {
            Err(AiError::InferenceFailed(_)) => {}
            other => panic!("Expected InferenceFailed, got {other:?}"),
        }
    }

    #[test]
    fn below_zero_prediction_is_passed_through() {
        let predictor = FootprintPredictor::new(Arc::new(FixedLogModel(-0.2)));
        let prediction = predictor.predict(&features()).unwrap();
        assert!(prediction.is_below_zero());
    }

    #[test]
    fn shared_model_serves_concurrent_callers() {
        let predictor = FootprintPredictor::new(Arc::new(FixedLogModel(3.0)));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = predictor.clone();
                std::thread::spawn(move || p.predict(&features()).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().log_value(), 3.0);
        }
    }
}
