//! Domain error model.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// One of the four lifestyle measurements a caller submits.
///
/// The `Display` form is the field name reported back to callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    #[serde(rename = "transport_km")]
    TransportKm,
    #[serde(rename = "electricity_kWh")]
    ElectricityKwh,
    #[serde(rename = "diet")]
    Diet,
    #[serde(rename = "waste_kg")]
    WasteKg,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::TransportKm => "transport_km",
            InputField::ElectricityKwh => "electricity_kWh",
            InputField::Diet => "diet",
            InputField::WasteKg => "waste_kg",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submitted field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum InvalidReason {
    /// The field was absent or blank.
    Missing,
    /// Text that does not parse as a number.
    NotANumber(String),
    /// NaN or an infinity.
    NonFinite,
    /// Below zero.
    Negative,
    /// A diet label outside the recognised categories.
    UnknownDiet(String),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Missing => f.write_str("value is missing"),
            InvalidReason::NotANumber(raw) => write!(f, "{raw:?} is not a number"),
            InvalidReason::NonFinite => f.write_str("value must be a finite number"),
            InvalidReason::Negative => f.write_str("value must not be negative"),
            InvalidReason::UnknownDiet(raw) => {
                write!(
                    f,
                    "{raw:?} is not a recognised diet (expected Vegetarian or Non-Vegetarian)"
                )
            }
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic failures: bad request data and
/// malformed startup configuration. Model failures belong to `ecotrace-ai`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A submitted measurement failed validation.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: InputField, reason: InvalidReason },

    /// Threshold, rule or policy configuration is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn invalid_input(field: InputField, reason: InvalidReason) -> Self {
        Self::InvalidInput { field, reason }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// The offending field, when this is an input error.
    pub fn field(&self) -> Option<InputField> {
        match self {
            DomainError::InvalidInput { field, .. } => Some(*field),
            DomainError::Configuration(_) => None,
        }
    }
}
