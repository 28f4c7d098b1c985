//! Tunable thresholds for suggestions and the breakdown heuristic.
//!
//! Loaded once at startup. Every check happens in [`SuggestionConfig::validate`],
//! so a malformed file fails the process before it serves a request.

use std::path::Path;

use serde::{Deserialize, Serialize};

use ecotrace_core::{DomainError, DomainResult};

use crate::breakdown::BreakdownPolicy;

/// Two-tier thresholds for one measurement.
///
/// `moderate` fires for `moderate_threshold < x <= high_threshold`,
/// `high` for `x > high_threshold`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholds {
    pub high_threshold: f64,
    pub moderate_threshold: f64,
}

impl TierThresholds {
    pub fn new(moderate_threshold: f64, high_threshold: f64) -> Self {
        Self {
            high_threshold,
            moderate_threshold,
        }
    }

    fn validate(&self, name: &str) -> DomainResult<()> {
        if !self.moderate_threshold.is_finite() || !self.high_threshold.is_finite() {
            return Err(DomainError::configuration(format!("{name}: thresholds must be finite")));
        }
        if self.moderate_threshold < 0.0 {
            return Err(DomainError::configuration(format!(
                "{name}: moderate_threshold must not be negative"
            )));
        }
        if self.moderate_threshold >= self.high_threshold {
            return Err(DomainError::configuration(format!(
                "{name}: moderate_threshold ({}) must be below high_threshold ({})",
                self.moderate_threshold, self.high_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestionConfig {
    pub transport_km: TierThresholds,
    #[serde(rename = "electricity_kWh", alias = "electricity_kwh")]
    pub electricity_kwh: TierThresholds,
    pub waste_kg: TierThresholds,
    /// Footprint above which the overall suggestion fires.
    pub sustainable_average_kgco2: f64,
    pub breakdown: BreakdownPolicy,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            transport_km: TierThresholds::new(100.0, 150.0),
            electricity_kwh: TierThresholds::new(50.0, 200.0),
            waste_kg: TierThresholds::new(5.0, 10.0),
            sustainable_average_kgco2: 250.0,
            breakdown: BreakdownPolicy::default(),
        }
    }
}

impl SuggestionConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.transport_km.validate("transport_km")?;
        self.electricity_kwh.validate("electricity_kWh")?;
        self.waste_kg.validate("waste_kg")?;

        if !(self.sustainable_average_kgco2.is_finite() && self.sustainable_average_kgco2 > 0.0) {
            return Err(DomainError::configuration(
                "sustainable_average_kgco2 must be a finite positive number",
            ));
        }

        self.breakdown.validate()
    }

    /// Parse and validate a JSON document. Missing sections take defaults.
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::configuration(format!("malformed suggestion config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}
