//! Schema normalization: canonical column names.
//!
//! Column names are canonicalized so that downstream stages can key
//! results by name without worrying about whitespace or punctuation:
//! trim, collapse interior whitespace runs to a single underscore, then
//! strip every character outside `[A-Za-z0-9_]`.

use crate::error::{AnalysisError, Result};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"));

/// Canonicalize a single column name.
///
/// A name that is already canonical maps to itself, so normalization is
/// idempotent.
pub fn canonical_name(name: &str) -> String {
    let trimmed = name.trim();
    let underscored = WHITESPACE_RUN.replace_all(trimmed, "_");
    NON_IDENTIFIER.replace_all(&underscored, "").into_owned()
}

/// Normalizes dataset column names to canonical form.
pub struct SchemaNormalizer;

impl SchemaNormalizer {
    /// Rename every column of `df` to its canonical name.
    ///
    /// Returns the renamed dataset plus an original -> canonical map
    /// containing only the names that actually changed. Fails with
    /// [`AnalysisError::SchemaError`] when two distinct input names
    /// collapse to the same canonical name; proceeding would silently
    /// drop or shadow a column.
    pub fn normalize(df: &DataFrame) -> Result<(DataFrame, BTreeMap<String, String>)> {
        let originals: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        let canonicals: Vec<String> = originals.iter().map(|n| canonical_name(n)).collect();

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (original, canonical) in originals.iter().zip(&canonicals) {
            if let Some(prior) = seen.insert(canonical.as_str(), original.as_str()) {
                return Err(AnalysisError::SchemaError {
                    canonical: canonical.clone(),
                    originals: vec![prior.to_string(), original.clone()],
                });
            }
        }

        let renamed: BTreeMap<String, String> = originals
            .iter()
            .zip(&canonicals)
            .filter(|(original, canonical)| original != canonical)
            .map(|(original, canonical)| (original.clone(), canonical.clone()))
            .collect();

        if !renamed.is_empty() {
            debug!(count = renamed.len(), "normalized column names");
        }

        let mut normalized = df.clone();
        normalized.set_column_names(canonicals.iter().map(String::as_str))?;

        Ok((normalized, renamed))
    }
}
