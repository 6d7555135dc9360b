//! Column profiling: kind classification and descriptive summaries.
//!
//! Classification is shallow by design: numeric vs. categorical by
//! declared dtype. Anything richer is the caller's concern.

use crate::error::Result;
use crate::types::{ColumnKind, ColumnSummary};
use crate::utils::{cast_f64, is_numeric_dtype, non_missing_count, string_mode};
use polars::prelude::*;

/// Profiles columns of a dataset.
pub struct DataProfiler;

impl DataProfiler {
    /// Classify a column as numeric or categorical by its dtype.
    pub fn column_kind(series: &Series) -> ColumnKind {
        if is_numeric_dtype(series.dtype()) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// Compute the descriptive record for one column.
    ///
    /// Numeric statistics use linear-interpolation quantiles and sample
    /// standard deviation; they are `None` when the column has no
    /// non-missing values. Categorical columns only carry count, missing
    /// count and mode.
    pub fn summarize_column(series: &Series) -> Result<ColumnSummary> {
        let kind = Self::column_kind(series);
        let count = non_missing_count(series);
        let missing = series.null_count();

        let mut summary = ColumnSummary {
            name: series.name().to_string(),
            kind,
            count,
            missing,
            mean: None,
            std: None,
            min: None,
            q1: None,
            median: None,
            q3: None,
            max: None,
            mode: None,
        };

        match kind {
            ColumnKind::Numeric => {
                if count > 0 {
                    let float_series = cast_f64(series)?;
                    let ca = float_series.f64()?;
                    summary.mean = ca.mean();
                    summary.std = ca.std(1);
                    summary.min = ca.min();
                    summary.q1 = ca.quantile(0.25, QuantileMethod::Linear)?;
                    summary.median = ca.median();
                    summary.q3 = ca.quantile(0.75, QuantileMethod::Linear)?;
                    summary.max = ca.max();
                }
            }
            ColumnKind::Categorical => {
                summary.mode = string_mode(series);
            }
        }

        Ok(summary)
    }

    /// Summarize every column of a dataset, in column order.
    pub fn summarize(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
        df.get_columns()
            .iter()
            .map(|col| Self::summarize_column(col.as_materialized_series()))
            .collect()
    }
}
