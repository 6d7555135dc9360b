//! Outlier detection over numeric columns.
//!
//! Two methods, selected by configuration: Tukey IQR fences and
//! absolute z-scores. Both flag values with their row index in the
//! cleaned dataset so callers can map a flag back to a record.

use crate::config::{AnalysisConfig, OutlierMethod};
use crate::error::Result;
use crate::types::{OutlierMap, OutlierPoint};
use crate::utils::{cast_f64, is_numeric_dtype, non_missing_count};
use polars::prelude::*;
use tracing::debug;

/// Detects outliers in numeric columns.
pub struct OutlierDetector;

impl OutlierDetector {
    /// Scan every numeric column of `df` for outliers.
    ///
    /// Every numeric column appears in the result, with an empty vector
    /// when nothing was flagged. Columns with fewer than two observed
    /// values are never flagged: the spread statistics are meaningless
    /// there.
    pub fn detect(df: &DataFrame, config: &AnalysisConfig) -> Result<OutlierMap> {
        let mut outliers = OutlierMap::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }

            let points = if non_missing_count(series) < 2 {
                Vec::new()
            } else {
                match config.outlier_method {
                    OutlierMethod::Iqr => Self::detect_iqr(series, config.iqr_multiplier)?,
                    OutlierMethod::ZScore => {
                        Self::detect_zscore(series, config.zscore_threshold)?
                    }
                }
            };

            if !points.is_empty() {
                debug!(
                    column = series.name().as_str(),
                    count = points.len(),
                    "flagged outliers"
                );
            }
            outliers.insert(series.name().to_string(), points);
        }

        Ok(outliers)
    }

    /// Flag values strictly outside the Tukey fences
    /// `[Q1 - k*IQR, Q3 + k*IQR]`.
    ///
    /// With a zero IQR (constant or near-constant column) the fences
    /// collapse onto the quartiles, so only values away from that
    /// constant are flagged.
    pub fn detect_iqr(series: &Series, multiplier: f64) -> Result<Vec<OutlierPoint>> {
        let float_series = cast_f64(series)?;
        let ca = float_series.f64()?;

        let (Some(q1), Some(q3)) = (
            ca.quantile(0.25, QuantileMethod::Linear)?,
            ca.quantile(0.75, QuantileMethod::Linear)?,
        ) else {
            return Ok(Vec::new());
        };

        let iqr = q3 - q1;
        let lower = q1 - multiplier * iqr;
        let upper = q3 + multiplier * iqr;

        Ok(Self::collect_flagged(ca, |v| v < lower || v > upper))
    }

    /// Flag values whose absolute z-score exceeds `threshold`.
    ///
    /// Uses the population standard deviation (ddof = 0) over the
    /// observed values. A zero-variance column flags nothing.
    pub fn detect_zscore(series: &Series, threshold: f64) -> Result<Vec<OutlierPoint>> {
        let float_series = cast_f64(series)?;
        let ca = float_series.f64()?;

        let (Some(mean), Some(std)) = (ca.mean(), ca.std(0)) else {
            return Ok(Vec::new());
        };
        if std == 0.0 {
            return Ok(Vec::new());
        }

        Ok(Self::collect_flagged(ca, |v| {
            ((v - mean) / std).abs() > threshold
        }))
    }

    fn collect_flagged<F>(ca: &Float64Chunked, is_outlier: F) -> Vec<OutlierPoint>
    where
        F: Fn(f64) -> bool,
    {
        ca.into_iter()
            .enumerate()
            .filter_map(|(row, value)| {
                value
                    .filter(|v| is_outlier(*v))
                    .map(|value| OutlierPoint { row, value })
            })
            .collect()
    }
}
