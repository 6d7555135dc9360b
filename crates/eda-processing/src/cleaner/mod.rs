//! Data cleaning orchestration.
//!
//! Cleaning runs three stages in a fixed order: schema normalization,
//! missing-value imputation, then duplicate removal. The input frame is
//! never mutated; the caller keeps it for before/after comparison.

pub mod schema;

pub use schema::SchemaNormalizer;

use crate::error::Result;
use crate::imputers::StatisticalImputer;
use crate::types::CleaningSummary;
use polars::prelude::*;
use tracing::info;

/// Runs the cleaning stages over a dataset.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a dataset: normalize column names, impute missing values,
    /// drop exact duplicate rows (first occurrence wins, row order
    /// otherwise preserved).
    ///
    /// Duplicates are detected after imputation, so two rows that differ
    /// only in which entries were missing collapse when their imputed
    /// forms match.
    pub fn clean(df: &DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        let rows_before = df.height();

        let (mut cleaned, renamed_columns) = SchemaNormalizer::normalize(df)?;

        let values_imputed = StatisticalImputer::impute(&mut cleaned)?;

        let before_dedup = cleaned.height();
        cleaned = cleaned.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let duplicates_removed = before_dedup - cleaned.height();

        let summary = CleaningSummary {
            rows_before,
            rows_after: cleaned.height(),
            duplicates_removed,
            values_imputed,
            renamed_columns,
        };

        info!(
            rows_before,
            rows_after = summary.rows_after,
            duplicates_removed,
            values_imputed = summary.total_imputed(),
            "cleaning complete"
        );

        Ok((cleaned, summary))
    }
}
