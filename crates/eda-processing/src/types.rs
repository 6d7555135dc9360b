//! Shared data types produced and consumed by the analysis pipeline.
//!
//! Everything here is request-scoped plain data: built fresh for one
//! invocation, serializable where a downstream consumer needs it, and
//! never shared mutably across analyses.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a column for analysis purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer or floating point values.
    Numeric,
    /// Everything else (strings, booleans, dates) is treated as categorical.
    Categorical,
}

impl ColumnKind {
    /// Human-readable name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

/// A single flagged value: its row index in the cleaned dataset and the
/// value itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierPoint {
    pub row: usize,
    pub value: f64,
}

/// Outliers per column, in original row order.
///
/// Every numeric column gets an entry, possibly empty. Keys are the
/// canonical (post-normalization) column names. `BTreeMap` keeps the
/// serialized output deterministic.
pub type OutlierMap = BTreeMap<String, Vec<OutlierPoint>>;

/// Per-column descriptive record, recomputed per stage and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Number of non-missing entries.
    pub count: usize,
    /// Number of missing entries.
    pub missing: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    /// Most frequent value, rendered as a string. Ties break to the
    /// lexicographically smallest candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Descriptive statistics for one numeric column, in the shape of a
/// classic `describe()` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Count and share of flagged values for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub count: usize,
    /// `100 * count / row_count` over the cleaned dataset.
    pub percentage: f64,
}

/// Pairwise Pearson correlation over the numeric columns.
///
/// `values[i][j]` is the correlation between `columns[i]` and
/// `columns[j]`; the matrix is symmetric with 1.0 on the diagonal for
/// columns with nonzero variance (NaN otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Look up the correlation between two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// The aggregate analysis result, immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// (row count, column count) of the cleaned dataset.
    pub shape: (usize, usize),
    /// Canonical column names, in dataset order.
    pub columns: Vec<String>,
    /// Per-column classification.
    pub dtypes: BTreeMap<String, ColumnKind>,
    /// Per-column count of entries still missing after imputation.
    /// Zero everywhere except entirely-missing numeric columns.
    pub missing_values: BTreeMap<String, usize>,
    /// Describe-style statistics per numeric column.
    pub descriptive_stats: BTreeMap<String, DescriptiveStats>,
    /// Flagged-value counts and percentages per numeric column.
    pub outlier_summary: BTreeMap<String, OutlierSummary>,
    /// Pearson matrix; `None` when fewer than two numeric columns exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
    /// Report creation timestamp.
    pub generated_at: String,
}

/// Histogram bin edges and counts for one numeric column.
///
/// `edges` has one more entry than `counts`; bin `i` covers
/// `[edges[i], edges[i + 1])`, with the last bin closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Five-number summary plus the flagged points for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlot {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub outliers: Vec<OutlierPoint>,
}

/// Chart-ready series derived from the cleaned dataset. Rendering is an
/// external concern; these are plain numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
    pub histograms: BTreeMap<String, Histogram>,
    pub box_plots: BTreeMap<String, BoxPlot>,
}

/// What the cleaning stage did, for before/after display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    /// Imputed value count per column (canonical names).
    pub values_imputed: BTreeMap<String, usize>,
    /// Original name -> canonical name, only for names that changed.
    pub renamed_columns: BTreeMap<String, String>,
}

impl CleaningSummary {
    /// Total imputed values across all columns.
    pub fn total_imputed(&self) -> usize {
        self.values_imputed.values().sum()
    }

    /// Percentage of rows removed as duplicates.
    pub fn duplicates_removed_percentage(&self) -> f64 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.duplicates_removed as f64 / self.rows_before as f64) * 100.0
        }
    }
}

/// Everything one analysis invocation returns.
///
/// The cleaned frame is a new dataset; the caller still holds the
/// original for before/after comparison.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub cleaned: DataFrame,
    pub outliers: OutlierMap,
    pub report: AnalysisReport,
    pub charts: ChartData,
    pub summary: CleaningSummary,
}
