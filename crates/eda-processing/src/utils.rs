//! Shared utilities for the analysis pipeline.
//!
//! Common helpers used across multiple modules to reduce duplication and
//! keep column-kind decisions consistent.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Cast a series to Float64 for numeric computation.
///
/// The returned series owns its data; call `.f64()` on it at the use site.
pub fn cast_f64(series: &Series) -> PolarsResult<Series> {
    series.cast(&DataType::Float64)
}

/// Number of non-missing entries in a series.
#[inline]
pub fn non_missing_count(series: &Series) -> usize {
    series.len() - series.null_count()
}

/// Calculate the mode (most frequent value) of a series, rendered as a
/// string. Ties break to the lexicographically smallest value so the
/// result is deterministic. Returns `None` for an entirely missing column.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val.to_string()).or_insert(0) += 1;
    }

    value_counts
        .into_iter()
        .max_by(|(val_a, count_a), (val_b, count_b)| {
            count_a.cmp(count_b).then(val_b.cmp(val_a))
        })
        .map(|(val, _)| val)
}

/// Fill null values in a numeric series with a specific value.
///
/// The result is always Float64.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = cast_f64(series)?;
    let filled: Vec<Option<f64>> = float_series
        .f64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a categorical series with a specific value.
///
/// Non-string categorical columns (booleans, dates) are cast to String
/// first, so the fill value and the existing values share one dtype.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = series.cast(&DataType::String)?;
    let filled: Vec<Option<String>> = str_series
        .str()?
        .into_iter()
        .map(|v| Some(v.map_or_else(|| fill_value.to_string(), str::to_string)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}
