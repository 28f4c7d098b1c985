use serde::Serialize;

use ecotrace_advice::{Breakdown, Suggestion};
use ecotrace_ai::Prediction;
use ecotrace_core::ValueObject;

/// Caveat shown alongside every set of suggestions.
pub const DISCLAIMER: &str =
    "Suggestions are generated based on typical carbon emission trends. Actual impact may vary.";

/// Everything the presentation layer receives for one submission.
///
/// Fields are private; once composed the result cannot be altered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintResult {
    prediction: Prediction,
    breakdown: Breakdown,
    suggestions: Vec<Suggestion>,
    disclaimer: &'static str,
}

impl ValueObject for FootprintResult {}

impl FootprintResult {
    pub fn prediction(&self) -> &Prediction {
        &self.prediction
    }

    pub fn footprint_kgco2(&self) -> f64 {
        self.prediction.footprint_kgco2()
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Suggestion text only, in display order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.suggestions.iter().map(|s| s.message.as_str())
    }

    pub fn disclaimer(&self) -> &'static str {
        self.disclaimer
    }
}

/// Composes pipeline outputs into a [`FootprintResult`]. No business logic.
#[derive(Debug, Copy, Clone, Default)]
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn compose(
        prediction: Prediction,
        breakdown: Breakdown,
        suggestions: Vec<Suggestion>,
    ) -> FootprintResult {
        FootprintResult {
            prediction,
            breakdown,
            suggestions,
            disclaimer: DISCLAIMER,
        }
    }
}
