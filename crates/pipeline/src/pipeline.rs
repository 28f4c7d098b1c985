//! Estimation pipeline (application-level orchestration).
//!
//! ```text
//! Submission
//!   ↓
//! 1. Validate (InputValidator)        → InvalidInput
//!   ↓
//! 2. Encode (FeatureEncoder)
//!   ↓
//! 3. Predict + expm1 (FootprintPredictor) → ModelUnavailable / ModelInference
//!   ↓
//! 4. Breakdown + Suggestions (independent, both pure)
//!   ↓
//! 5. Compose (ResultAggregator)
//! ```
//!
//! The pipeline holds no per-request state. The only shared resource is the
//! read-only model handle, so one instance may serve any number of threads.
//! There is no internal timeout or retry: callers decide both.

use std::sync::Arc;

use tracing::{debug, warn};

use ecotrace_advice::{BreakdownCalculator, SuggestionConfig, SuggestionEngine};
use ecotrace_ai::{FootprintPredictor, SharedModel};
use ecotrace_core::{DomainResult, FeatureEncoder, InputValidator, RawInputs, Submission};

use crate::aggregator::{FootprintResult, ResultAggregator};
use crate::error::EstimationError;

#[derive(Debug)]
struct Stages {
    predictor: FootprintPredictor,
    calculator: BreakdownCalculator,
    engine: SuggestionEngine,
}

/// Cheap to clone; clones share the same stages.
#[derive(Debug, Clone)]
pub struct FootprintPipeline {
    stages: Arc<Stages>,
}

impl FootprintPipeline {
    pub fn new(
        predictor: FootprintPredictor,
        calculator: BreakdownCalculator,
        engine: SuggestionEngine,
    ) -> Self {
        Self {
            stages: Arc::new(Stages {
                predictor,
                calculator,
                engine,
            }),
        }
    }

    /// Build every stage from configuration, validating it up front.
    ///
    /// With `model = None` the pipeline still constructs; each estimate then
    /// fails with `ModelUnavailable`.
    pub fn from_config(
        model: Option<SharedModel>,
        config: &SuggestionConfig,
    ) -> DomainResult<Self> {
        config.validate()?;

        let predictor = match model {
            Some(model) => FootprintPredictor::new(model),
            None => FootprintPredictor::unavailable("no footprint model is loaded"),
        };
        let calculator = BreakdownCalculator::new(config.breakdown.clone())?;
        let engine = SuggestionEngine::from_config(config)?;

        Ok(Self::new(predictor, calculator, engine))
    }

    pub fn is_model_available(&self) -> bool {
        self.stages.predictor.is_available()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.stages.predictor.model_name()
    }

    /// Validate a raw submission, then estimate.
    pub fn estimate_submission(
        &self,
        submission: &Submission,
    ) -> Result<FootprintResult, EstimationError> {
        let inputs = InputValidator::validate(submission).inspect_err(|err| {
            debug!(error = %err, "submission rejected");
        })?;
        self.estimate(&inputs)
    }

    pub fn estimate(&self, inputs: &RawInputs) -> Result<FootprintResult, EstimationError> {
        let features = FeatureEncoder::encode(inputs);
        debug!(features = ?features.as_array(), "features encoded");

        let prediction = self.stages.predictor.predict(&features).map_err(|err| {
            let err = EstimationError::from(err);
            warn!(error = %err, "footprint estimation failed");
            err
        })?;

        let breakdown = self.stages.calculator.calculate(inputs, &prediction);
        let suggestions = self.stages.engine.evaluate(inputs, &prediction);

        debug!(
            footprint_kgco2 = prediction.footprint_kgco2(),
            suggestions = suggestions.len(),
            "estimation complete"
        );

        Ok(ResultAggregator::compose(prediction, breakdown, suggestions))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use ecotrace_advice::suggestions::{
        DIET_NON_VEGETARIAN, ELECTRICITY_HIGH, TRANSPORT_HIGH, WASTE_HIGH,
    };
    use ecotrace_advice::{Category, ALREADY_SUSTAINABLE};
    use ecotrace_ai::{AiError, LinearModel, RegressionModel};
    use ecotrace_core::{Diet, FeatureVector, InputField, InvalidReason};

    struct RaisingModel;

    impl RegressionModel for RaisingModel {
        fn name(&self) -> &str {
            "raising"
        }

        fn infer(&self, _features: &FeatureVector) -> Result<f64, AiError> {
            Err(AiError::InferenceFailed("estimator not fitted".to_string()))
        }
    }

    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl RegressionModel for CountingModel {
        fn name(&self) -> &str {
            "counting"
        }

        fn infer(&self, _features: &FeatureVector) -> Result<f64, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(1.0)
        }
    }

    /// log1p-scale model: zero inputs give expm1(3.0) ≈ 19.1 kgCO₂,
    /// scenario B gives expm1(5.2) ≈ 180.3 kgCO₂.
    fn linear_model() -> SharedModel {
        Arc::new(LinearModel::new("test-linear", 3.0, [0.004, 0.002, 0.35, 0.03]).unwrap())
    }

    fn pipeline_with(model: SharedModel, config: &SuggestionConfig) -> FootprintPipeline {
        FootprintPipeline::from_config(Some(model), config).unwrap()
    }

    fn scenario_b() -> RawInputs {
        RawInputs::new(200.0, 300.0, Diet::NonVegetarian, 15.0).unwrap()
    }

    #[test]
    fn scenario_a_zero_vegetarian_is_already_sustainable() {
        let pipeline = pipeline_with(linear_model(), &SuggestionConfig::default());
        let inputs = RawInputs::new(0.0, 0.0, Diet::Vegetarian, 0.0).unwrap();

        let result = pipeline.estimate(&inputs).unwrap();
        assert!((result.footprint_kgco2() - 3.0f64.exp_m1()).abs() < 1e-9);
        assert_eq!(result.messages().collect::<Vec<_>>(), vec![ALREADY_SUSTAINABLE]);
    }

    #[test]
    fn scenario_b_fires_all_high_tiers_without_overall_below_average() {
        let pipeline = pipeline_with(linear_model(), &SuggestionConfig::default());

        let result = pipeline.estimate(&scenario_b()).unwrap();
        assert!(result.footprint_kgco2() < 250.0);
        assert_eq!(
            result.messages().collect::<Vec<_>>(),
            vec![TRANSPORT_HIGH, ELECTRICITY_HIGH, DIET_NON_VEGETARIAN, WASTE_HIGH]
        );
    }

    #[test]
    fn scenario_b_adds_overall_rule_above_average() {
        let config = SuggestionConfig {
            sustainable_average_kgco2: 100.0,
            ..SuggestionConfig::default()
        };
        let pipeline = pipeline_with(linear_model(), &config);

        let result = pipeline.estimate(&scenario_b()).unwrap();
        assert!(result.footprint_kgco2() > 100.0);
        let categories: Vec<_> = result.suggestions().iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Transport,
                Category::Electricity,
                Category::Diet,
                Category::Waste,
                Category::Overall,
            ]
        );
    }

    #[test]
    fn scenario_c_inference_failure_never_builds_a_result() {
        let pipeline = pipeline_with(Arc::new(RaisingModel), &SuggestionConfig::default());

        let err = pipeline.estimate(&scenario_b()).unwrap_err();
        assert_eq!(err, EstimationError::ModelInference("estimator not fitted".to_string()));
        assert!(err.is_transient());
    }

    #[test]
    fn missing_model_is_reported_as_unavailable() {
        let pipeline = FootprintPipeline::from_config(None, &SuggestionConfig::default()).unwrap();
        assert!(!pipeline.is_model_available());
        assert!(matches!(
            pipeline.estimate(&scenario_b()),
            Err(EstimationError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn invalid_submission_never_reaches_the_model() {
        let model = Arc::new(CountingModel::default());
        let pipeline = pipeline_with(model.clone(), &SuggestionConfig::default());

        let submission = Submission::new(10.0, -5.0, "Vegetarian", 1.0);
        let err = pipeline.estimate_submission(&submission).unwrap_err();
        assert_eq!(
            err,
            EstimationError::InvalidInput {
                field: InputField::ElectricityKwh,
                reason: InvalidReason::Negative,
            }
        );
        assert!(!err.is_transient());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);

        pipeline
            .estimate_submission(&Submission::new(10.0, 5.0, "Vegetarian", 1.0))
            .unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_configuration_fails_construction() {
        let config = SuggestionConfig {
            sustainable_average_kgco2: f64::NAN,
            ..SuggestionConfig::default()
        };
        assert!(FootprintPipeline::from_config(Some(linear_model()), &config).is_err());
    }

    #[test]
    fn breakdown_splits_the_predicted_total() {
        let pipeline = pipeline_with(linear_model(), &SuggestionConfig::default());
        let result = pipeline.estimate(&scenario_b()).unwrap();

        let allocated: f64 = result.breakdown().shares.iter().map(|s| s.kgco2).sum();
        assert!((allocated - result.footprint_kgco2()).abs() < 1e-6);
    }

    #[test]
    fn result_serializes_for_the_presentation_layer() {
        let pipeline = pipeline_with(linear_model(), &SuggestionConfig::default());
        let result = pipeline.estimate(&scenario_b()).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["prediction"]["footprint_kgco2"].is_f64());
        assert_eq!(json["breakdown"]["shares"].as_array().unwrap().len(), 4);
        assert_eq!(json["suggestions"][0]["category"], "transport");
        assert_eq!(json["suggestions"][0]["severity"], "high");
        assert!(json["disclaimer"].as_str().unwrap().contains("Actual impact may vary"));
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let pipeline = pipeline_with(linear_model(), &SuggestionConfig::default());
        let a = pipeline.estimate(&scenario_b()).unwrap();
        let b = pipeline.clone().estimate(&scenario_b()).unwrap();
        assert_eq!(a, b);
    }
}
