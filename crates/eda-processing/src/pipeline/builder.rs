//! Main analysis pipeline module.
//!
//! The core `Pipeline` struct and builder orchestrating the cleaning
//! and analysis workflow.

use crate::charts::ChartDataBuilder;
use crate::cleaner::DataCleaner;
use crate::config::{AnalysisConfig, AnalysisConfigBuilder, OutlierMethod};
use crate::error::{AnalysisError, Result};
use crate::pipeline::OutlierDetector;
use crate::reporting::ReportSynthesizer;
use crate::types::AnalysisOutcome;
use polars::prelude::*;
use std::time::Instant;
use tracing::{error, info};

/// The main analysis pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use eda_processing::{OutlierMethod, Pipeline};
///
/// let outcome = Pipeline::builder()
///     .outlier_method(OutlierMethod::ZScore)
///     .zscore_threshold(2.5)
///     .build()?
///     .analyze(&dataframe)?;
///
/// println!("{} rows after cleaning", outcome.report.shape.0);
/// ```
#[derive(Debug)]
pub struct Pipeline {
    config: AnalysisConfig,
}

// Pipelines move into worker threads when several uploads are analyzed
// concurrently.
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Create a pipeline from an existing configuration.
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis over a dataset.
    ///
    /// Stages run in a fixed order: clean (normalize, impute,
    /// deduplicate), detect outliers, synthesize the report, build
    /// chart data. The input frame is left untouched.
    pub fn analyze(&self, df: &DataFrame) -> Result<AnalysisOutcome> {
        match self.analyze_internal(df) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(code = e.error_code(), "analysis failed: {e}");
                Err(e)
            }
        }
    }

    fn analyze_internal(&self, df: &DataFrame) -> Result<AnalysisOutcome> {
        if df.height() == 0 || df.width() == 0 {
            return Err(AnalysisError::EmptyDataset);
        }

        let started = Instant::now();
        info!(
            rows = df.height(),
            columns = df.width(),
            method = ?self.config.outlier_method,
            "starting analysis"
        );

        let (cleaned, summary) = DataCleaner::clean(df)?;
        let outliers = OutlierDetector::detect(&cleaned, &self.config)?;
        let report = ReportSynthesizer::synthesize(&cleaned, &outliers)?;
        let charts =
            ChartDataBuilder::build(&cleaned, &outliers, report.correlation.clone(), &self.config)?;

        info!(
            rows = cleaned.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            cleaned,
            outliers,
            report,
            charts,
            summary,
        })
    }
}

/// Builder for [`Pipeline`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: AnalysisConfigBuilder,
}

impl PipelineBuilder {
    /// Set the outlier detection method.
    pub fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.config = self.config.outlier_method(method);
        self
    }

    /// Set the IQR fence multiplier.
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        self.config = self.config.iqr_multiplier(k);
        self
    }

    /// Set the absolute z-score threshold.
    pub fn zscore_threshold(mut self, threshold: f64) -> Self {
        self.config = self.config.zscore_threshold(threshold);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.config = self.config.histogram_bins(bins);
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self
            .config
            .build()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        Ok(Pipeline { config })
    }
}
