//! Threshold rules that turn inputs and a prediction into advice.
//!
//! Rules are evaluated in order and every firing rule contributes its message
//! (evaluation does not stop at the first match). Within a category, tiers
//! are disjoint bands, so at most one tier fires per category.

use serde::Serialize;
use tracing::debug;

use ecotrace_ai::Prediction;
use ecotrace_core::{Diet, DomainError, DomainResult, RawInputs};

use crate::category::Category;
use crate::config::{SuggestionConfig, TierThresholds};

pub const TRANSPORT_HIGH: &str = "You travel a long distance: replace car trips with public \
    transport, car-pooling or an electric vehicle wherever you can.";
pub const TRANSPORT_MODERATE: &str =
    "Consider using public transport or biking for shorter distances.";
pub const ELECTRICITY_HIGH: &str = "Your electricity use is high: move to a renewable tariff or \
    on-site solar, and cut heating, cooling and standby loads.";
pub const ELECTRICITY_MODERATE: &str =
    "Switch to energy-efficient appliances or renewable energy sources.";
pub const DIET_NON_VEGETARIAN: &str = "Try incorporating more plant-based meals into your diet.";
pub const WASTE_HIGH: &str = "You produce a lot of waste: compost organic scraps, recycle \
    consistently and avoid single-use packaging.";
pub const WASTE_MODERATE: &str = "Start composting organic waste and reduce single-use plastics.";

/// Emitted alone when no rule fires.
pub const ALREADY_SUSTAINABLE: &str =
    "Your lifestyle is already sustainable. Keep up the good habits!";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Moderate,
    High,
}

/// Quantity a band condition reads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TransportKm,
    ElectricityKwh,
    WasteKg,
    FootprintKgco2,
}

impl Metric {
    fn read(&self, inputs: &RawInputs, prediction: &Prediction) -> f64 {
        match self {
            Metric::TransportKm => inputs.transport_km(),
            Metric::ElectricityKwh => inputs.electricity_kwh(),
            Metric::WasteKg => inputs.waste_kg(),
            Metric::FootprintKgco2 => prediction.footprint_kgco2(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Fires for `above < value <= up_to`, or `value > above` when `up_to` is `None`.
    Band {
        metric: Metric,
        above: f64,
        up_to: Option<f64>,
    },
    DietIs { diet: Diet },
}

impl Condition {
    pub fn band(metric: Metric, above: f64, up_to: Option<f64>) -> Self {
        Condition::Band { metric, above, up_to }
    }

    pub fn holds(&self, inputs: &RawInputs, prediction: &Prediction) -> bool {
        match self {
            Condition::Band { metric, above, up_to } => {
                let value = metric.read(inputs, prediction);
                value > *above && up_to.is_none_or(|limit| value <= limit)
            }
            Condition::DietIs { diet } => inputs.diet() == *diet,
        }
    }

    /// Whether both conditions can hold for the same input.
    fn overlaps(&self, other: &Condition) -> bool {
        match (self, other) {
            (
                Condition::Band { metric: m1, above: a1, up_to: u1 },
                Condition::Band { metric: m2, above: a2, up_to: u2 },
            ) => {
                if m1 != m2 {
                    return true;
                }
                let u1 = u1.unwrap_or(f64::INFINITY);
                let u2 = u2.unwrap_or(f64::INFINITY);
                a1 < &u2 && a2 < &u1
            }
            (Condition::DietIs { diet: d1 }, Condition::DietIs { diet: d2 }) => d1 == d2,
            _ => true,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if let Condition::Band { metric, above, up_to } = self {
            if !above.is_finite() || up_to.is_some_and(|u| !u.is_finite()) {
                return Err(DomainError::configuration(format!(
                    "{metric:?} band thresholds must be finite"
                )));
            }
            if up_to.is_some_and(|u| u <= *above) {
                return Err(DomainError::configuration(format!(
                    "{metric:?} band upper bound must exceed its lower bound"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub category: Category,
    pub severity: Severity,
    pub condition: Condition,
    pub message: String,
}

impl Rule {
    pub fn new(
        category: Category,
        severity: Severity,
        condition: Condition,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            condition,
            message: message.into(),
        }
    }
}

/// An ordered, validated list of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validate and wrap a rule list.
    ///
    /// Rejected: non-finite or empty bands, rules out of category order, and
    /// two rules in one category that could fire for the same input.
    pub fn new(rules: Vec<Rule>) -> DomainResult<Self> {
        for rule in &rules {
            rule.condition.validate()?;
            if rule.message.trim().is_empty() {
                return Err(DomainError::configuration(format!(
                    "{} rule has an empty message",
                    rule.category
                )));
            }
        }

        if let Some(pair) = rules.windows(2).find(|w| w[0].category > w[1].category) {
            return Err(DomainError::configuration(format!(
                "rule for {} is listed after {}; rules must follow category order",
                pair[1].category, pair[0].category
            )));
        }

        for (i, a) in rules.iter().enumerate() {
            for b in rules[i + 1..].iter().filter(|b| b.category == a.category) {
                if a.condition.overlaps(&b.condition) {
                    return Err(DomainError::configuration(format!(
                        "{} rules {:?} and {:?} are not mutually exclusive",
                        a.category, a.severity, b.severity
                    )));
                }
            }
        }

        Ok(Self { rules })
    }

    /// The standard rule list: two tiers each for transport, electricity and
    /// waste, one diet rule, then the overall-footprint rule.
    pub fn from_config(config: &SuggestionConfig) -> DomainResult<Self> {
        config.validate()?;

        let mut rules = Vec::with_capacity(8);
        push_tiers(
            &mut rules,
            Category::Transport,
            Metric::TransportKm,
            &config.transport_km,
            TRANSPORT_HIGH,
            TRANSPORT_MODERATE,
        );
        push_tiers(
            &mut rules,
            Category::Electricity,
            Metric::ElectricityKwh,
            &config.electricity_kwh,
            ELECTRICITY_HIGH,
            ELECTRICITY_MODERATE,
        );
        rules.push(Rule::new(
            Category::Diet,
            Severity::High,
            Condition::DietIs { diet: Diet::NonVegetarian },
            DIET_NON_VEGETARIAN,
        ));
        push_tiers(
            &mut rules,
            Category::Waste,
            Metric::WasteKg,
            &config.waste_kg,
            WASTE_HIGH,
            WASTE_MODERATE,
        );
        rules.push(Rule::new(
            Category::Overall,
            Severity::High,
            Condition::band(Metric::FootprintKgco2, config.sustainable_average_kgco2, None),
            format!(
                "Your estimated footprint is above the sustainable average of {} kgCO₂; \
                 start with the largest category in your breakdown.",
                config.sustainable_average_kgco2
            ),
        ));

        Self::new(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

fn push_tiers(
    rules: &mut Vec<Rule>,
    category: Category,
    metric: Metric,
    tiers: &TierThresholds,
    high_message: &str,
    moderate_message: &str,
) {
    rules.push(Rule::new(
        category,
        Severity::High,
        Condition::band(metric, tiers.high_threshold, None),
        high_message,
    ));
    rules.push(Rule::new(
        category,
        Severity::Moderate,
        Condition::band(metric, tiers.moderate_threshold, Some(tiers.high_threshold)),
        moderate_message,
    ));
}

/// One piece of advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
}

impl Suggestion {
    pub fn already_sustainable() -> Self {
        Self {
            category: Category::Overall,
            severity: Severity::Info,
            message: ALREADY_SUSTAINABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    rules: RuleSet,
}

impl SuggestionEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &SuggestionConfig) -> DomainResult<Self> {
        Ok(Self::new(RuleSet::from_config(config)?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn evaluate(&self, inputs: &RawInputs, prediction: &Prediction) -> Vec<Suggestion> {
        let mut fired: Vec<Suggestion> = self
            .rules
            .rules()
            .iter()
            .filter(|rule| rule.condition.holds(inputs, prediction))
            .map(|rule| Suggestion {
                category: rule.category,
                severity: rule.severity,
                message: rule.message.clone(),
            })
            .collect();

        debug!(fired = fired.len(), "suggestion rules evaluated");

        if fired.is_empty() {
            fired.push(Suggestion::already_sustainable());
        }
        fired
    }
}
