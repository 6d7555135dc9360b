//! Report synthesis.
//!
//! Turns a cleaned dataset plus its outlier scan into the aggregate
//! analysis report consumers display or serialize.

pub mod generator;

pub use generator::{ReportSynthesizer, correlation_matrix};
