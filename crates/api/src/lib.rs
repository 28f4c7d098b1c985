//! HTTP presentation layer: routing, request/response mapping, settings.
//!
//! The estimation logic lives in `ecotrace-pipeline`; this crate only turns
//! form submissions into pipeline calls and results into JSON.

pub mod app;
pub mod context;
pub mod middleware;
pub mod settings;
