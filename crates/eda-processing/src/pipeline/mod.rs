//! Pipeline module.
//!
//! The main analysis pipeline and its components.

mod builder;
pub mod outliers;

pub use builder::{Pipeline, PipelineBuilder};
pub use outliers::OutlierDetector;
