//! `ecotrace-core`: domain foundation for footprint estimation.
//!
//! This crate contains **pure domain** primitives (no model, no I/O):
//! validated inputs, the model's feature encoding, and the error model.

pub mod error;
pub mod features;
pub mod inputs;
pub mod value_object;

pub use error::{DomainError, DomainResult, InputField, InvalidReason};
pub use features::{FeatureEncoder, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use inputs::{Diet, InputValidator, RawInputs, RawScalar, Submission};
pub use value_object::ValueObject;
