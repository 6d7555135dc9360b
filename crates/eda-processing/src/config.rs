//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. Nothing here is ambient or
//! global: a config is built per invocation and passed into the pipeline,
//! so concurrent analyses stay independent.

use serde::{Deserialize, Serialize};

/// Statistical method used for outlier detection in numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Interquartile-range fences: values strictly outside
    /// `[Q1 - k*IQR, Q3 + k*IQR]` are outliers.
    #[default]
    Iqr,
    /// Standardized scores: values whose absolute z-score (population
    /// standard deviation) exceeds the threshold are outliers.
    ZScore,
}

/// Configuration for one analysis invocation.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use eda_processing::config::{AnalysisConfig, OutlierMethod};
///
/// let config = AnalysisConfig::builder()
///     .outlier_method(OutlierMethod::ZScore)
///     .zscore_threshold(2.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Outlier detection method.
    /// Default: Iqr
    pub outlier_method: OutlierMethod,

    /// Multiplier `k` for the IQR fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Absolute z-score above which a value counts as an outlier.
    /// Default: 3.0
    pub zscore_threshold: f64,

    /// Number of histogram bins per numeric column.
    /// Default: 30
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethod::default(),
            iqr_multiplier: 1.5,
            zscore_threshold: 3.0,
            histogram_bins: 30,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidFactor {
                field: "iqr_multiplier".to_string(),
                value: self.iqr_multiplier,
            });
        }

        if !self.zscore_threshold.is_finite() || self.zscore_threshold <= 0.0 {
            return Err(ConfigValidationError::InvalidFactor {
                field: "zscore_threshold".to_string(),
                value: self.zscore_threshold,
            });
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidHistogramBins(
                self.histogram_bins,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be finite and positive)")]
    InvalidFactor { field: String, value: f64 },

    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidHistogramBins(usize),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    outlier_method: Option<OutlierMethod>,
    iqr_multiplier: Option<f64>,
    zscore_threshold: Option<f64>,
    histogram_bins: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the outlier detection method.
    pub fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.outlier_method = Some(method);
        self
    }

    /// Set the IQR fence multiplier.
    ///
    /// # Arguments
    /// * `k` - Positive multiplier (e.g., 1.5 for the standard Tukey fences)
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        self.iqr_multiplier = Some(k);
        self
    }

    /// Set the absolute z-score threshold.
    pub fn zscore_threshold(mut self, threshold: f64) -> Self {
        self.zscore_threshold = Some(threshold);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            outlier_method: self.outlier_method.unwrap_or_default(),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(1.5),
            zscore_threshold: self.zscore_threshold.unwrap_or(3.0),
            histogram_bins: self.histogram_bins.unwrap_or(30),
        };

        config.validate()?;
        Ok(config)
    }
}
