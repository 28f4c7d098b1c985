use thiserror::Error;

use ecotrace_ai::AiError;
use ecotrace_core::{DomainError, InputField, InvalidReason};

/// Everything a single estimation can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// The submission was rejected before reaching the model.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: InputField, reason: InvalidReason },

    /// No model is loaded, or it cannot serve right now.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model raised or returned an unusable value.
    #[error("model inference failed: {0}")]
    ModelInference(String),

    /// Malformed thresholds or rules. Pipeline construction validates these,
    /// so a constructed pipeline never returns this from `estimate`.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl EstimationError {
    /// Whether the caller could reasonably retry the same submission later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EstimationError::ModelUnavailable(_) | EstimationError::ModelInference(_)
        )
    }
}

impl From<AiError> for EstimationError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::ModelUnavailable(msg) => EstimationError::ModelUnavailable(msg),
            AiError::ModelLoad(msg) => EstimationError::ModelUnavailable(msg),
            AiError::InferenceFailed(msg) => EstimationError::ModelInference(msg),
        }
    }
}

impl From<DomainError> for EstimationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput { field, reason } => {
                EstimationError::InvalidInput { field, reason }
            }
            DomainError::Configuration(msg) => EstimationError::Configuration(msg),
        }
    }
}
