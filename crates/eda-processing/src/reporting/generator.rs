//! Builds the aggregate analysis report.

use crate::error::{AnalysisError, Result};
use crate::profiler::DataProfiler;
use crate::types::{
    AnalysisReport, ColumnKind, CorrelationMatrix, DescriptiveStats, OutlierMap, OutlierSummary,
};
use crate::utils::{cast_f64, is_numeric_dtype};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Synthesizes the final analysis report.
pub struct ReportSynthesizer;

impl ReportSynthesizer {
    /// Build the report for a cleaned dataset and its outlier scan.
    ///
    /// Fails with [`AnalysisError::UndefinedStatistic`] when asked to
    /// express outlier percentages over zero rows.
    pub fn synthesize(df: &DataFrame, outliers: &OutlierMap) -> Result<AnalysisReport> {
        let row_count = df.height();
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut dtypes = BTreeMap::new();
        let mut missing_values = BTreeMap::new();
        let mut descriptive_stats = BTreeMap::new();

        for summary in DataProfiler::summarize(df)? {
            dtypes.insert(summary.name.clone(), summary.kind);
            missing_values.insert(summary.name.clone(), summary.missing);

            if summary.kind == ColumnKind::Numeric {
                descriptive_stats.insert(
                    summary.name.clone(),
                    DescriptiveStats {
                        count: summary.count,
                        mean: summary.mean,
                        std: summary.std,
                        min: summary.min,
                        q25: summary.q1,
                        q50: summary.median,
                        q75: summary.q3,
                        max: summary.max,
                    },
                );
            }
        }

        let mut outlier_summary = BTreeMap::new();
        for (col_name, points) in outliers {
            if row_count == 0 {
                return Err(AnalysisError::UndefinedStatistic(format!(
                    "outlier percentage for '{col_name}' over zero rows"
                )));
            }
            outlier_summary.insert(
                col_name.clone(),
                OutlierSummary {
                    count: points.len(),
                    percentage: (points.len() as f64 / row_count as f64) * 100.0,
                },
            );
        }

        let correlation = correlation_matrix(df)?;

        debug!(
            rows = row_count,
            columns = columns.len(),
            numeric = descriptive_stats.len(),
            "report synthesized"
        );

        Ok(AnalysisReport {
            shape: (row_count, columns.len()),
            columns,
            dtypes,
            missing_values,
            descriptive_stats,
            outlier_summary,
            correlation,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Pairwise-complete Pearson correlation over the numeric columns.
///
/// Returns `None` when the dataset has fewer than two numeric columns.
/// A pair with fewer than two jointly observed rows, or with zero
/// variance on either side, gets a NaN entry rather than failing the
/// whole report. The diagonal is 1.0 for columns with nonzero variance
/// and NaN otherwise.
pub fn correlation_matrix(df: &DataFrame) -> Result<Option<CorrelationMatrix>> {
    let mut names = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        if !is_numeric_dtype(series.dtype()) {
            continue;
        }
        let float_series = cast_f64(series)?;
        names.push(series.name().to_string());
        columns.push(float_series.f64()?.into_iter().collect());
    }

    if names.len() < 2 {
        return Ok(None);
    }

    let n = names.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = if has_variance(&columns[i]) { 1.0 } else { f64::NAN };
        for j in (i + 1)..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(Some(CorrelationMatrix {
        columns: names,
        values,
    }))
}

fn has_variance(column: &[Option<f64>]) -> bool {
    let mut observed = column.iter().flatten();
    match observed.next() {
        Some(first) => observed.any(|v| v != first),
        None => false,
    }
}

/// Pearson's r over the rows where both columns are observed.
fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| (*x).zip(*y))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutlierPoint;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_shape_and_columns() {
        let df = df![
            "age" => [30.0, 40.0, 50.0],
            "city" => ["x", "y", "z"],
        ]
        .unwrap();

        let report = ReportSynthesizer::synthesize(&df, &OutlierMap::new()).unwrap();

        assert_eq!(report.shape, (3, 2));
        assert_eq!(report.columns, vec!["age".to_string(), "city".to_string()]);
        assert_eq!(report.dtypes.get("age"), Some(&ColumnKind::Numeric));
        assert_eq!(report.dtypes.get("city"), Some(&ColumnKind::Categorical));
    }

    #[test]
    fn test_descriptive_stats_only_for_numeric() {
        let df = df![
            "age" => [30.0, 40.0, 50.0],
            "city" => ["x", "y", "z"],
        ]
        .unwrap();

        let report = ReportSynthesizer::synthesize(&df, &OutlierMap::new()).unwrap();

        assert!(report.descriptive_stats.contains_key("age"));
        assert!(!report.descriptive_stats.contains_key("city"));
        let stats = &report.descriptive_stats["age"];
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, Some(40.0));
        assert_eq!(stats.q50, Some(40.0));
    }

    #[test]
    fn test_outlier_percentage_is_exact() {
        let df = df![
            "v" => (1..=20).map(|v| v as f64).collect::<Vec<_>>(),
        ]
        .unwrap();

        let mut outliers = OutlierMap::new();
        outliers.insert(
            "v".to_string(),
            vec![OutlierPoint { row: 19, value: 20.0 }],
        );

        let report = ReportSynthesizer::synthesize(&df, &outliers).unwrap();
        let summary = report.outlier_summary.get("v").unwrap();

        assert_eq!(summary.count, 1);
        assert_eq!(summary.percentage, 5.0);
    }

    #[test]
    fn test_zero_row_percentage_is_an_error() {
        let df = df!["v" => Vec::<f64>::new()].unwrap();
        let mut outliers = OutlierMap::new();
        outliers.insert("v".to_string(), Vec::new());

        let err = ReportSynthesizer::synthesize(&df, &outliers).unwrap_err();
        assert!(matches!(err, AnalysisError::UndefinedStatistic(_)));
    }

    #[test]
    fn test_correlation_none_for_single_numeric_column() {
        let df = df![
            "v" => [1.0, 2.0],
            "c" => ["a", "b"],
        ]
        .unwrap();

        assert!(correlation_matrix(&df).unwrap().is_none());
    }

    #[test]
    fn test_correlation_symmetry_and_diagonal() {
        let df = df![
            "a" => [1.0, 2.0, 3.0, 4.0],
            "b" => [2.0, 4.0, 6.0, 8.0],
            "c" => [4.0, 3.0, 2.0, 1.0],
        ]
        .unwrap();

        let m = correlation_matrix(&df).unwrap().unwrap();

        for i in 0..3 {
            assert!((m.values[i][i] - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert!((m.values[i][j] - m.values[j][i]).abs() < 1e-12);
            }
        }
        // a and b are perfectly correlated; a and c perfectly anti-correlated.
        assert!((m.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
        assert!((m.get("a", "c").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_constant_column_is_nan() {
        let df = df![
            "a" => [1.0, 2.0, 3.0],
            "b" => [5.0, 5.0, 5.0],
        ]
        .unwrap();

        let m = correlation_matrix(&df).unwrap().unwrap();

        assert!(m.get("a", "b").unwrap().is_nan());
        assert!(m.get("b", "b").unwrap().is_nan());
        assert!((m.get("a", "a").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_pairwise_complete() {
        // The missing entry in `a` drops row 2 from the (a, b) pairs.
        let df = df![
            "a" => [Some(1.0), Some(2.0), None, Some(4.0)],
            "b" => [Some(1.0), Some(2.0), Some(100.0), Some(4.0)],
        ]
        .unwrap();

        let m = correlation_matrix(&df).unwrap().unwrap();
        assert!((m.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_values_after_cleaning() {
        let df = df![
            "filled" => [1.0, 2.0],
            "ghost" => [Option::<f64>::None, None],
        ]
        .unwrap();

        let report = ReportSynthesizer::synthesize(&df, &OutlierMap::new()).unwrap();

        assert_eq!(report.missing_values.get("filled"), Some(&0));
        assert_eq!(report.missing_values.get("ghost"), Some(&2));
    }
}
