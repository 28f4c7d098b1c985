//! `ecotrace-advice`: explanation and recommendations around a prediction.
//!
//! Nothing here feeds back into the model: the breakdown is a display
//! heuristic and the suggestions are plain threshold rules.

pub mod breakdown;
pub mod category;
pub mod config;
pub mod suggestions;

pub use breakdown::{Breakdown, BreakdownCalculator, BreakdownPolicy, BreakdownShare};
pub use category::Category;
pub use config::{SuggestionConfig, TierThresholds};
pub use suggestions::{
    Condition, Metric, Rule, RuleSet, Severity, Suggestion, SuggestionEngine, ALREADY_SUSTAINABLE,
};
