//! Feature encoding for the footprint model.
//!
//! The model was trained on a frame with columns
//! `Transport_km, Electricity_kWh, Diet_Type, Waste_kg` (in that order) and
//! `Diet_Type` coded as Vegetarian = 0, Non-Vegetarian = 1. Both the column
//! order and the diet coding are fixed here; changing either silently
//! corrupts every prediction.

use serde::Serialize;

use crate::inputs::{Diet, RawInputs};
use crate::value_object::ValueObject;

/// Column names the model was trained with, in encoding order.
pub const FEATURE_NAMES: [&str; 4] = ["Transport_km", "Electricity_kWh", "Diet_Type", "Waste_kg"];

/// Number of features the model expects.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

impl Diet {
    /// Training-time code for this diet.
    pub fn code(&self) -> u8 {
        match self {
            Diet::Vegetarian => 0,
            Diet::NonVegetarian => 1,
        }
    }

    /// Inverse of [`Diet::code`].
    pub fn from_code(code: u8) -> Option<Diet> {
        match code {
            0 => Some(Diet::Vegetarian),
            1 => Some(Diet::NonVegetarian),
            _ => None,
        }
    }
}

/// Fixed-order numeric features: `[transport_km, electricity_kWh, diet_code, waste_kg]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl ValueObject for FeatureVector {}

impl FeatureVector {
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn transport_km(&self) -> f64 {
        self.0[0]
    }

    pub fn electricity_kwh(&self) -> f64 {
        self.0[1]
    }

    pub fn diet_code(&self) -> f64 {
        self.0[2]
    }

    pub fn waste_kg(&self) -> f64 {
        self.0[3]
    }

    /// Decode the diet column back through the two-way mapping.
    pub fn diet(&self) -> Option<Diet> {
        let code = self.diet_code();
        if code == 0.0 {
            Diet::from_code(0)
        } else if code == 1.0 {
            Diet::from_code(1)
        } else {
            None
        }
    }

    /// `(column name, value)` pairs in training order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Maps validated inputs to the model's feature vector.
#[derive(Debug, Copy, Clone, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn encode(inputs: &RawInputs) -> FeatureVector {
        FeatureVector([
            inputs.transport_km(),
            inputs.electricity_kwh(),
            f64::from(inputs.diet().code()),
            inputs.waste_kg(),
        ])
    }
}
