//! Per-category decomposition of a footprint, for display.
//!
//! This is an explanatory heuristic, **not** the model's attribution: the
//! trained model's internal weights are opaque and are never consulted here.
//! Each category gets a weight from a fixed, versioned policy (distance,
//! energy and waste scale with their raw magnitude, diet contributes a flat
//! constant), and the predicted total is split in proportion to those weights.
//! Bump `version` whenever the factors change so displayed breakdowns can be
//! told apart.

use serde::{Deserialize, Serialize};

use ecotrace_ai::Prediction;
use ecotrace_core::{Diet, DomainError, DomainResult, RawInputs, ValueObject};

use crate::category::Category;

/// Weighting factors for the breakdown heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakdownPolicy {
    pub version: String,
    pub transport_per_km: f64,
    pub electricity_per_kwh: f64,
    pub diet_vegetarian: f64,
    pub diet_non_vegetarian: f64,
    pub waste_per_kg: f64,
}

impl Default for BreakdownPolicy {
    fn default() -> Self {
        Self {
            version: "heuristic-v1".to_string(),
            transport_per_km: 0.21,
            electricity_per_kwh: 0.45,
            diet_vegetarian: 1.5,
            diet_non_vegetarian: 3.3,
            waste_per_kg: 0.5,
        }
    }
}

impl BreakdownPolicy {
    pub fn validate(&self) -> DomainResult<()> {
        if self.version.trim().is_empty() {
            return Err(DomainError::configuration("breakdown.version must not be empty"));
        }
        let factors = [
            ("transport_per_km", self.transport_per_km),
            ("electricity_per_kwh", self.electricity_per_kwh),
            ("diet_vegetarian", self.diet_vegetarian),
            ("diet_non_vegetarian", self.diet_non_vegetarian),
            ("waste_per_kg", self.waste_per_kg),
        ];
        for (name, value) in factors {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DomainError::configuration(format!(
                    "breakdown.{name} must be a finite non-negative number"
                )));
            }
        }
        Ok(())
    }

    /// `(quantity, factor)` for one category; its weight is their product.
    /// Diet contributes a flat constant, so its quantity is one.
    fn term(&self, category: Category, inputs: &RawInputs) -> (f64, f64) {
        match category {
            Category::Transport => (inputs.transport_km(), self.transport_per_km),
            Category::Electricity => (inputs.electricity_kwh(), self.electricity_per_kwh),
            Category::Diet => match inputs.diet() {
                Diet::Vegetarian => (1.0, self.diet_vegetarian),
                Diet::NonVegetarian => (1.0, self.diet_non_vegetarian),
            },
            Category::Waste => (inputs.waste_kg(), self.waste_per_kg),
            Category::Overall => (0.0, 0.0),
        }
    }
}

/// One category's slice of the footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownShare {
    pub category: Category,
    /// Raw heuristic weight before normalisation, saturated at `f64::MAX`.
    pub weight: f64,
    /// Fraction of the whole, in `[0, 1]`.
    pub share: f64,
    /// `share × predicted footprint`.
    pub kgco2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub policy_version: String,
    pub shares: Vec<BreakdownShare>,
}

impl ValueObject for Breakdown {}

impl Breakdown {
    pub fn get(&self, category: Category) -> Option<&BreakdownShare> {
        self.shares.iter().find(|s| s.category == category)
    }

    /// Category with the largest share; ties go to the earlier category.
    pub fn largest(&self) -> Option<Category> {
        self.shares
            .iter()
            .fold(None::<&BreakdownShare>, |best, s| match best {
                Some(b) if b.share >= s.share => Some(b),
                _ => Some(s),
            })
            .map(|s| s.category)
    }
}

#[derive(Debug, Clone)]
pub struct BreakdownCalculator {
    policy: BreakdownPolicy,
}

impl BreakdownCalculator {
    pub fn new(policy: BreakdownPolicy) -> DomainResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &BreakdownPolicy {
        &self.policy
    }

    /// Split the predicted total across the measured categories.
    ///
    /// A submission with nothing measured (every quantity zero, vegetarian
    /// diet) is split evenly, as is any case where every weight is zero.
    pub fn calculate(&self, inputs: &RawInputs, prediction: &Prediction) -> Breakdown {
        let terms = Category::MEASURED.map(|c| self.policy.term(c, inputs));
        let shares = if nothing_measured(inputs) {
            [UNIFORM_SHARE; MEASURED_COUNT]
        } else {
            proportional_shares(terms)
        };

        let shares = Category::MEASURED
            .into_iter()
            .zip(terms)
            .zip(shares)
            .map(|((category, (quantity, factor)), share)| BreakdownShare {
                category,
                weight: (quantity * factor).min(f64::MAX),
                share,
                kgco2: share * prediction.footprint_kgco2(),
            })
            .collect();

        Breakdown {
            policy_version: self.policy.version.clone(),
            shares,
        }
    }
}

const MEASURED_COUNT: usize = Category::MEASURED.len();
const UNIFORM_SHARE: f64 = 1.0 / MEASURED_COUNT as f64;

fn nothing_measured(inputs: &RawInputs) -> bool {
    inputs.transport_km() == 0.0
        && inputs.electricity_kwh() == 0.0
        && inputs.waste_kg() == 0.0
        && inputs.diet() == Diet::Vegetarian
}

/// Normalised `quantity × factor` shares.
///
/// Quantities and factors are each rescaled into `[0, 1]` before
/// multiplying, so the total stays finite for any finite inputs and policy.
fn proportional_shares(terms: [(f64, f64); MEASURED_COUNT]) -> [f64; MEASURED_COUNT] {
    let magnitude = terms.iter().map(|(q, _)| *q).fold(1.0, f64::max);
    let factor_scale = terms.iter().map(|(_, f)| *f).fold(0.0, f64::max);
    if factor_scale == 0.0 {
        return [UNIFORM_SHARE; MEASURED_COUNT];
    }

    let scaled = terms.map(|(q, f)| (q / magnitude) * (f / factor_scale));
    let total: f64 = scaled.iter().sum();
    if total > 0.0 {
        scaled.map(|w| w / total)
    } else {
        [UNIFORM_SHARE; MEASURED_COUNT]
    }
}

impl Default for BreakdownCalculator {
    fn default() -> Self {
        Self {
            policy: BreakdownPolicy::default(),
        }
    }
}
