//! Exploratory Data Analysis Pipeline Library
//!
//! A data-cleaning and exploratory-analysis library built with Rust and Polars.
//!
//! # Overview
//!
//! This library turns a raw tabular dataset into a cleaned dataset plus a
//! structured analysis:
//!
//! - **Schema Normalization**: Canonical, identifier-safe column names
//! - **Imputation**: Median fill for numeric columns, mode fill for categorical
//! - **Deduplication**: Exact duplicate rows removed, first occurrence kept
//! - **Outlier Detection**: IQR fences or z-scores, selected per invocation
//! - **Report Synthesis**: Shape, dtypes, describe-style stats, correlations
//! - **Chart Data**: Histograms, box plots and a correlation matrix as plain numbers
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_processing::{OutlierMethod, Pipeline};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("data.csv".into()))?
//!     .finish()?;
//!
//! let outcome = Pipeline::builder()
//!     .outlier_method(OutlierMethod::Iqr)
//!     .iqr_multiplier(1.5)
//!     .build()?
//!     .analyze(&df)?;
//!
//! println!("{} rows after cleaning", outcome.report.shape.0);
//! println!("{}", serde_json::to_string_pretty(&outcome.report)?);
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to customize detection behavior:
//!
//! ```rust,ignore
//! use eda_processing::config::*;
//!
//! let config = AnalysisConfig::builder()
//!     .outlier_method(OutlierMethod::ZScore)
//!     .zscore_threshold(2.5)
//!     .histogram_bins(20)
//!     .build()?;
//! ```
//!
//! Every analysis is independent: the pipeline holds no shared mutable
//! state, so concurrent datasets can be analyzed from separate threads.

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::ChartDataBuilder;
pub use cleaner::{DataCleaner, SchemaNormalizer};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, OutlierMethod};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::{OutlierDetector, Pipeline, PipelineBuilder};
pub use profiler::DataProfiler;
pub use reporting::{ReportSynthesizer, correlation_matrix};
pub use types::{
    AnalysisOutcome, AnalysisReport, BoxPlot, ChartData, CleaningSummary, ColumnKind,
    ColumnSummary, CorrelationMatrix, DescriptiveStats, Histogram, OutlierMap, OutlierPoint,
    OutlierSummary,
};
pub use utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, string_mode};
