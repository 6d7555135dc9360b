//! Integration tests for the analysis pipeline.
//!
//! These tests verify end-to-end behavior over small in-memory datasets.

use eda_processing::{
    AnalysisError, ColumnKind, OutlierMethod, Pipeline,
};
use polars::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn people_frame() -> DataFrame {
    df![
        "First Name" => [Some("ann"), Some("bob"), Some("ann"), None, Some("dan"), Some("eve")],
        "Age (years)" => [Some(30.0), Some(32.0), Some(30.0), Some(31.0), None, Some(29.0)],
        "Score" => [10.0, 12.0, 10.0, 11.0, 13.0, 9.0],
    ]
    .unwrap()
}

fn default_pipeline() -> Pipeline {
    Pipeline::builder().build().unwrap()
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_cleans_and_reports() {
    let df = people_frame();
    let outcome = default_pipeline().analyze(&df).unwrap();

    // Schema normalization
    assert!(outcome.cleaned.column("First_Name").is_ok());
    assert!(outcome.cleaned.column("Age_years").is_ok());
    assert_eq!(
        outcome.summary.renamed_columns.get("Age (years)"),
        Some(&"Age_years".to_string())
    );

    // Imputation filled one name and one age
    assert_eq!(outcome.summary.values_imputed.get("First_Name"), Some(&1));
    assert_eq!(outcome.summary.values_imputed.get("Age_years"), Some(&1));

    // The exact duplicate row collapsed
    assert_eq!(outcome.summary.duplicates_removed, 1);
    assert_eq!(outcome.cleaned.height(), 5);

    // Report reflects the cleaned frame
    assert_eq!(outcome.report.shape, (5, 3));
    assert_eq!(
        outcome.report.dtypes.get("First_Name"),
        Some(&ColumnKind::Categorical)
    );
    assert_eq!(
        outcome.report.dtypes.get("Age_years"),
        Some(&ColumnKind::Numeric)
    );
    assert_eq!(outcome.report.missing_values.get("Age_years"), Some(&0));
}

#[test]
fn test_cleaning_is_idempotent() {
    let df = people_frame();
    let pipeline = default_pipeline();

    let first = pipeline.analyze(&df).unwrap();
    let second = pipeline.analyze(&first.cleaned).unwrap();

    assert_eq!(second.summary.duplicates_removed, 0);
    assert!(second.summary.values_imputed.is_empty());
    assert!(second.summary.renamed_columns.is_empty());
    assert_eq!(first.cleaned.shape(), second.cleaned.shape());
}

#[test]
fn test_input_frame_is_never_mutated() {
    let df = people_frame();
    let _ = default_pipeline().analyze(&df).unwrap();

    assert_eq!(df.height(), 6);
    assert_eq!(df.column("Age (years)").unwrap().null_count(), 1);
    assert!(df.column("First Name").is_ok());
}

#[test]
fn test_empty_dataset_is_rejected() {
    let df = df!["v" => Vec::<f64>::new()].unwrap();
    let err = default_pipeline().analyze(&df).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyDataset));
}

#[test]
fn test_column_name_collision_is_rejected() {
    let df = df![
        "unit price" => [1.0, 2.0],
        "unit_price" => [3.0, 4.0],
    ]
    .unwrap();

    let err = default_pipeline().analyze(&df).unwrap_err();
    assert!(matches!(err, AnalysisError::SchemaError { .. }));
}

// ============================================================================
// Imputation Properties
// ============================================================================

#[test]
fn test_imputation_leaves_no_missing_values() {
    let df = df![
        "a" => [Some(1.0), None, Some(3.0), None],
        "b" => [Some("x"), None, Some("x"), Some("y")],
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    for col in outcome.cleaned.get_columns() {
        assert_eq!(col.null_count(), 0, "column {} still has nulls", col.name());
    }
    assert!(
        outcome
            .report
            .missing_values
            .values()
            .all(|&missing| missing == 0)
    );
}

#[test]
fn test_entirely_missing_numeric_column_survives() {
    let df = df![
        "ok" => [1.0, 2.0, 3.0],
        "ghost" => [Option::<f64>::None, None, None],
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    // No statistic exists to fill with, so the column stays missing and
    // the report says so.
    assert_eq!(outcome.report.missing_values.get("ghost"), Some(&3));
    assert!(!outcome.report.descriptive_stats.contains_key("ghost")
        || outcome.report.descriptive_stats["ghost"].mean.is_none());
    assert!(outcome.outliers.get("ghost").unwrap().is_empty());
}

#[test]
fn test_categorical_without_mode_gets_unknown() {
    let df = df![
        "label" => [Option::<&str>::None, None, None],
        "v" => [1.0, 2.0, 3.0],
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    let label = outcome.cleaned.column("label").unwrap();
    let ca = label.str().unwrap();
    assert!((0..ca.len()).all(|i| ca.get(i) == Some("Unknown")));
}

// ============================================================================
// Outlier Detection Properties
// ============================================================================

#[test]
fn test_iqr_uniform_range_has_no_outliers() {
    let df = df![
        "v" => (1..=10).map(|v| v as f64).collect::<Vec<_>>(),
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    assert!(outcome.outliers.get("v").unwrap().is_empty());
    assert_eq!(outcome.report.outlier_summary.get("v").unwrap().count, 0);
}

#[test]
fn test_iqr_flags_the_extreme_value() {
    let mut values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
    values.push(100.0);
    let df = df!["v" => &values].unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    let flagged = outcome.outliers.get("v").unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].value, 100.0);

    let summary = outcome.report.outlier_summary.get("v").unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.percentage, 10.0);
}

#[test]
fn test_zscore_method_flags_the_extreme_value() {
    let mut values: Vec<f64> = vec![10.0; 20];
    values.push(1000.0);
    // A second varying column keeps the frame from deduplicating the
    // repeated rows away.
    let ids: Vec<f64> = (0..21).map(|v| v as f64).collect();
    let df = df!["id" => &ids, "v" => &values].unwrap();

    let outcome = Pipeline::builder()
        .outlier_method(OutlierMethod::ZScore)
        .build()
        .unwrap()
        .analyze(&df)
        .unwrap();

    let flagged = outcome.outliers.get("v").unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].value, 1000.0);
}

#[test]
fn test_iqr_and_zscore_disagree_near_the_threshold() {
    let mut values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
    values.push(100.0);
    let df = df!["v" => &values].unwrap();

    let iqr = default_pipeline().analyze(&df).unwrap();
    let zscore = Pipeline::builder()
        .outlier_method(OutlierMethod::ZScore)
        .build()
        .unwrap()
        .analyze(&df)
        .unwrap();

    // The IQR fences sit near [-3.5, 14.5], so 100 is well outside.
    assert_eq!(iqr.outliers.get("v").unwrap().len(), 1);
    // The same point's z-score is 85.5 / 28.6 (population std), about
    // 2.99, just under the default 3.0 threshold, so it is kept.
    assert!(zscore.outliers.get("v").unwrap().is_empty());
    assert_eq!(zscore.report.outlier_summary.get("v").unwrap().count, 0);
}

#[test]
fn test_outlier_rows_index_into_cleaned_frame() {
    let df = df![
        "v" => [1.0, 1.0, 2.0, 3.0, 100.0],
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    let flagged = outcome.outliers.get("v").unwrap();
    assert_eq!(flagged.len(), 1);
    let row = flagged[0].row;
    let value = outcome
        .cleaned
        .column("v")
        .unwrap()
        .get(row)
        .unwrap()
        .try_extract::<f64>()
        .unwrap();
    assert_eq!(value, flagged[0].value);
}

// ============================================================================
// Correlation and Chart Properties
// ============================================================================

#[test]
fn test_correlation_is_symmetric_with_unit_diagonal() {
    let df = df![
        "a" => [1.0, 2.0, 3.0, 4.0, 5.0],
        "b" => [2.0, 4.0, 5.0, 4.0, 5.0],
        "c" => [9.0, 7.0, 5.0, 3.0, 1.0],
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    // Charts carry the same matrix the report computed.
    assert_eq!(outcome.charts.correlation, outcome.report.correlation);

    let m = outcome.report.correlation.unwrap();

    assert_eq!(m.columns.len(), 3);
    for i in 0..3 {
        assert!((m.values[i][i] - 1.0).abs() < 1e-12);
        for j in 0..3 {
            assert!((m.values[i][j] - m.values[j][i]).abs() < 1e-12);
            assert!(m.values[i][j] >= -1.0 - 1e-12 && m.values[i][j] <= 1.0 + 1e-12);
        }
    }
    assert!((m.get("a", "c").unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn test_histograms_cover_every_observation() {
    let df = df![
        "v" => (1..=50).map(|v| v as f64).collect::<Vec<_>>(),
        "w" => (1..=50).map(|v| (v * 3) as f64).collect::<Vec<_>>(),
    ]
    .unwrap();

    let outcome = Pipeline::builder()
        .histogram_bins(10)
        .build()
        .unwrap()
        .analyze(&df)
        .unwrap();

    for (name, histogram) in &outcome.charts.histograms {
        assert_eq!(histogram.edges.len(), histogram.counts.len() + 1);
        assert_eq!(
            histogram.counts.iter().sum::<usize>(),
            50,
            "histogram for {} dropped observations",
            name
        );
    }
}

#[test]
fn test_box_plots_match_descriptive_stats() {
    let df = df![
        "v" => (1..=10).map(|v| v as f64).collect::<Vec<_>>(),
        "w" => (1..=10).map(|v| (v * v) as f64).collect::<Vec<_>>(),
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();

    for (name, box_plot) in &outcome.charts.box_plots {
        let stats = outcome.report.descriptive_stats.get(name).unwrap();
        assert_eq!(Some(box_plot.min), stats.min);
        assert_eq!(Some(box_plot.max), stats.max);
        assert_eq!(Some(box_plot.median), stats.q50);
        assert_eq!(Some(box_plot.q1), stats.q25);
        assert_eq!(Some(box_plot.q3), stats.q75);
    }
}

// ============================================================================
// Report Serialization
// ============================================================================

#[test]
fn test_report_serializes_with_describe_keys() {
    let df = df![
        "v" => [1.0, 2.0, 3.0, 4.0],
        "w" => [4.0, 3.0, 2.0, 1.0],
    ]
    .unwrap();

    let outcome = default_pipeline().analyze(&df).unwrap();
    let json = serde_json::to_value(&outcome.report).unwrap();

    assert!(json["descriptive_stats"]["v"]["25%"].is_number());
    assert!(json["descriptive_stats"]["v"]["50%"].is_number());
    assert!(json["descriptive_stats"]["v"]["75%"].is_number());
    assert!(json["shape"].is_array());
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_config_errors_surface_through_builder() {
    let err = Pipeline::builder()
        .zscore_threshold(f64::NAN)
        .build()
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidConfig(_)));
}
