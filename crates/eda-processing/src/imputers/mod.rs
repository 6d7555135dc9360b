//! Missing-value imputation.
//!
//! One strategy per column kind: median for numeric columns, mode for
//! categorical columns, with a constant fallback when no mode exists.

pub mod statistical;

pub use statistical::StatisticalImputer;
