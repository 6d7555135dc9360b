//! Chart-ready data series.
//!
//! Produces plain numbers for rendering elsewhere: histograms, box
//! plots and the correlation matrix. No drawing happens here.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::types::{BoxPlot, ChartData, CorrelationMatrix, Histogram, OutlierMap};
use crate::utils::{cast_f64, is_numeric_dtype, non_missing_count};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds chart data from a cleaned dataset.
pub struct ChartDataBuilder;

impl ChartDataBuilder {
    /// Build histograms and box plots, carrying the correlation matrix
    /// already computed for the report.
    ///
    /// Numeric columns with no observed values are skipped entirely;
    /// there is nothing to draw for them.
    pub fn build(
        df: &DataFrame,
        outliers: &OutlierMap,
        correlation: Option<CorrelationMatrix>,
        config: &AnalysisConfig,
    ) -> Result<ChartData> {
        let mut histograms = BTreeMap::new();
        let mut box_plots = BTreeMap::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) || non_missing_count(series) == 0 {
                continue;
            }
            let name = series.name().to_string();

            if let Some(histogram) = Self::histogram(series, config.histogram_bins)? {
                histograms.insert(name.clone(), histogram);
            }
            if let Some(box_plot) = Self::box_plot(series, outliers)? {
                box_plots.insert(name, box_plot);
            }
        }

        debug!(
            histograms = histograms.len(),
            box_plots = box_plots.len(),
            "chart data built"
        );

        Ok(ChartData {
            correlation,
            histograms,
            box_plots,
        })
    }

    /// Equal-width histogram over the observed values.
    ///
    /// Bins are `[edges[i], edges[i + 1])`, except the last which is
    /// closed on the right so the maximum lands in it. A constant
    /// column gets a single bin spanning `[v - 0.5, v + 0.5]`.
    pub fn histogram(series: &Series, bins: usize) -> Result<Option<Histogram>> {
        let float_series = cast_f64(series)?;
        let ca = float_series.f64()?;
        let values: Vec<f64> = ca.into_iter().flatten().collect();

        if values.is_empty() {
            return Ok(None);
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Ok(Some(Histogram {
                edges: vec![min - 0.5, min + 0.5],
                counts: vec![values.len()],
            }));
        }

        let width = (max - min) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| min + i as f64 * width).collect();

        let mut counts = vec![0usize; bins];
        for v in &values {
            let mut idx = ((v - min) / width) as usize;
            if idx >= bins {
                idx = bins - 1;
            }
            counts[idx] += 1;
        }

        Ok(Some(Histogram { edges, counts }))
    }

    /// Five-number summary plus the already-detected outlier points.
    pub fn box_plot(series: &Series, outliers: &OutlierMap) -> Result<Option<BoxPlot>> {
        let float_series = cast_f64(series)?;
        let ca = float_series.f64()?;

        let (Some(min), Some(max)) = (ca.min(), ca.max()) else {
            return Ok(None);
        };
        let (Some(q1), Some(median), Some(q3)) = (
            ca.quantile(0.25, QuantileMethod::Linear)?,
            ca.median(),
            ca.quantile(0.75, QuantileMethod::Linear)?,
        ) else {
            return Ok(None);
        };

        let points = outliers
            .get(series.name().as_str())
            .cloned()
            .unwrap_or_default();

        Ok(Some(BoxPlot {
            min,
            q1,
            median,
            q3,
            max,
            outliers: points,
        }))
    }
}
