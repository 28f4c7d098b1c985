//! `ecotrace-ai`
//!
//! **Responsibility:** model boundary for footprint estimation.
//!
//! - The regression model is an injected capability ([`RegressionModel`]),
//!   loaded once and shared read-only.
//! - [`FootprintPredictor`] undoes the training-time `log1p` transform.
//! - Failures surface as [`AiError`]; no fallback values are fabricated.

pub mod linear;
pub mod model;
pub mod predictor;
pub mod result;

pub use linear::LinearModel;
pub use model::{RegressionModel, SharedModel};
pub use predictor::FootprintPredictor;
pub use result::{AiError, Prediction};
