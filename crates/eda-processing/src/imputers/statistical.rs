//! Statistical imputation methods.
//!
//! Numeric columns are filled with their median; categorical columns
//! with their mode, falling back to the constant `"Unknown"` when no
//! mode exists. A numeric column with no observed values at all is left
//! untouched, since no statistic can be computed for it.

use crate::error::{AnalysisError, Result};
use crate::profiler::DataProfiler;
use crate::types::ColumnKind;
use crate::utils::{fill_numeric_nulls, fill_string_nulls, string_mode};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Fill value used for categorical columns with no mode.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing values in every column of `df` in place.
    ///
    /// Returns the number of values imputed per column, keyed by column
    /// name; columns that needed no filling are omitted.
    pub fn impute(df: &mut DataFrame) -> Result<BTreeMap<String, usize>> {
        let col_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut imputed = BTreeMap::new();
        for col_name in col_names {
            let filled = Self::impute_column(df, &col_name)?;
            if filled > 0 {
                imputed.insert(col_name, filled);
            }
        }

        Ok(imputed)
    }

    /// Fill missing values in one column, returning how many were filled.
    pub fn impute_column(df: &mut DataFrame, col_name: &str) -> Result<usize> {
        let series = df
            .column(col_name)
            .map_err(|_| AnalysisError::ColumnNotFound(col_name.to_string()))?
            .as_materialized_series()
            .clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(0);
        }

        match DataProfiler::column_kind(&series) {
            ColumnKind::Numeric => {
                let Some(median_val) = series.median() else {
                    // Entirely missing: nothing to fill with.
                    debug!(column = col_name, "skipping imputation, no observed values");
                    return Ok(0);
                };
                let filled = fill_numeric_nulls(&series, median_val)?;
                df.replace(col_name, filled)?;
                debug!(column = col_name, count = missing, value = median_val, "median imputation");
            }
            ColumnKind::Categorical => {
                let fill_value =
                    string_mode(&series).unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
                let filled = fill_string_nulls(&series, &fill_value)?;
                df.replace(col_name, filled)?;
                debug!(column = col_name, count = missing, value = %fill_value, "mode imputation");
            }
        }

        Ok(missing)
    }
}
