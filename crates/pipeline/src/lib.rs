//! `ecotrace-pipeline`: validate → encode → predict → explain → compose.
//!
//! The one entry point the presentation layer needs: build a
//! [`FootprintPipeline`] once at startup and call
//! [`FootprintPipeline::estimate_submission`] per form submission.

pub mod aggregator;
pub mod error;
pub mod pipeline;

pub use aggregator::{FootprintResult, ResultAggregator, DISCLAIMER};
pub use error::EstimationError;
pub use pipeline::FootprintPipeline;
