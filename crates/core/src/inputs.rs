//! Raw lifestyle measurements and their validation.
//!
//! A [`RawInputs`] value can only be obtained through validation, so every
//! later stage may assume finite, non-negative quantities and a known diet.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, InputField, InvalidReason};
use crate::value_object::ValueObject;

/// Diet category.
///
/// The serialized labels match the choices offered by the input form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    #[serde(rename = "Vegetarian")]
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
}

impl Diet {
    pub fn label(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "Vegetarian",
            Diet::NonVegetarian => "Non-Vegetarian",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Diet {
    type Err = DomainError;

    /// Case-insensitive; spaces, hyphens and underscores are ignored, so
    /// `"Non-Vegetarian"`, `"non_vegetarian"` and `"NonVegetarian"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "vegetarian" | "veg" => Ok(Diet::Vegetarian),
            "nonvegetarian" | "nonveg" => Ok(Diet::NonVegetarian),
            "" => Err(DomainError::invalid_input(InputField::Diet, InvalidReason::Missing)),
            _ => Err(DomainError::invalid_input(
                InputField::Diet,
                InvalidReason::UnknownDiet(s.trim().to_string()),
            )),
        }
    }
}

/// Validated lifestyle measurements for one submission.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RawInputs {
    transport_km: f64,
    #[serde(rename = "electricity_kWh")]
    electricity_kwh: f64,
    diet: Diet,
    waste_kg: f64,
}

impl ValueObject for RawInputs {}

impl RawInputs {
    /// Validate already-typed measurements.
    ///
    /// Fields are checked in feature order and the first failure is returned.
    pub fn new(
        transport_km: f64,
        electricity_kwh: f64,
        diet: Diet,
        waste_kg: f64,
    ) -> DomainResult<Self> {
        Ok(Self {
            transport_km: validate_quantity(InputField::TransportKm, transport_km)?,
            electricity_kwh: validate_quantity(InputField::ElectricityKwh, electricity_kwh)?,
            diet,
            waste_kg: validate_quantity(InputField::WasteKg, waste_kg)?,
        })
    }

    pub fn transport_km(&self) -> f64 {
        self.transport_km
    }

    pub fn electricity_kwh(&self) -> f64 {
        self.electricity_kwh
    }

    pub fn diet(&self) -> Diet {
        self.diet
    }

    pub fn waste_kg(&self) -> f64 {
        self.waste_kg
    }
}

/// A raw scalar as a caller may send it: a number, or text to be parsed.
///
/// Any other JSON value lands in `Other` so that validation, not
/// deserialization, decides it is wrong and can name the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawScalar {
    /// Echo of the raw value for error messages.
    fn describe(&self) -> String {
        match self {
            RawScalar::Number(n) => n.to_string(),
            RawScalar::Text(text) => text.trim().to_string(),
            RawScalar::Other(value) => value.to_string(),
        }
    }
}

impl From<f64> for RawScalar {
    fn from(value: f64) -> Self {
        RawScalar::Number(value)
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        RawScalar::Text(value.to_string())
    }
}

/// Unvalidated form submission (the presentation layer's view of the inputs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub transport_km: Option<RawScalar>,
    #[serde(default, rename = "electricity_kWh", alias = "electricity_kwh")]
    pub electricity_kwh: Option<RawScalar>,
    #[serde(default)]
    pub diet: Option<RawScalar>,
    #[serde(default)]
    pub waste_kg: Option<RawScalar>,
}

impl Submission {
    pub fn new(
        transport_km: impl Into<RawScalar>,
        electricity_kwh: impl Into<RawScalar>,
        diet: impl Into<RawScalar>,
        waste_kg: impl Into<RawScalar>,
    ) -> Self {
        Self {
            transport_km: Some(transport_km.into()),
            electricity_kwh: Some(electricity_kwh.into()),
            diet: Some(diet.into()),
            waste_kg: Some(waste_kg.into()),
        }
    }
}

/// Normalizes and bounds-checks raw submissions.
#[derive(Debug, Copy, Clone, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn validate(submission: &Submission) -> DomainResult<RawInputs> {
        let transport_km =
            parse_quantity(InputField::TransportKm, submission.transport_km.as_ref())?;
        let electricity_kwh =
            parse_quantity(InputField::ElectricityKwh, submission.electricity_kwh.as_ref())?;
        let diet = parse_diet(submission.diet.as_ref())?;
        let waste_kg = parse_quantity(InputField::WasteKg, submission.waste_kg.as_ref())?;

        RawInputs::new(transport_km, electricity_kwh, diet, waste_kg)
    }
}

fn parse_quantity(field: InputField, raw: Option<&RawScalar>) -> DomainResult<f64> {
    let value = match raw {
        None => return Err(DomainError::invalid_input(field, InvalidReason::Missing)),
        Some(RawScalar::Number(n)) => *n,
        Some(RawScalar::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(DomainError::invalid_input(field, InvalidReason::Missing));
            }
            trimmed.parse::<f64>().map_err(|_| {
                DomainError::invalid_input(field, InvalidReason::NotANumber(trimmed.to_string()))
            })?
        }
        Some(other) => {
            return Err(DomainError::invalid_input(
                field,
                InvalidReason::NotANumber(other.describe()),
            ));
        }
    };
    validate_quantity(field, value)
}

fn parse_diet(raw: Option<&RawScalar>) -> DomainResult<Diet> {
    match raw {
        None => Err(DomainError::invalid_input(InputField::Diet, InvalidReason::Missing)),
        Some(RawScalar::Text(text)) => text.parse::<Diet>(),
        Some(other) => Err(DomainError::invalid_input(
            InputField::Diet,
            InvalidReason::UnknownDiet(other.describe()),
        )),
    }
}

fn validate_quantity(field: InputField, value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::invalid_input(field, InvalidReason::NonFinite));
    }
    if value < 0.0 {
        return Err(DomainError::invalid_input(field, InvalidReason::Negative));
    }
    // Fold -0.0 into 0.0 so encoded vectors compare bit-for-bit.
    Ok(if value == 0.0 { 0.0 } else { value })
}
