//! Per-group outlier filtering

use super::{float_values, group_keys, rows_by_group};
use crate::{Error, OutlierMethod, Result};
use groupwise_stats::descriptive::{mad, mean, median, sample_std, FiveNumberSummary, MAD_NORMAL_CONSISTENCY};
use polars::prelude::*;

/// Acceptance interval for one group, or `None` when its spread is zero
pub fn outlier_bounds(values: &[f64], method: OutlierMethod, k: f64) -> Result<Option<(f64, f64)>> {
    let bounds = match method {
        OutlierMethod::Mad => {
            let center = median(values)?;
            let spread = MAD_NORMAL_CONSISTENCY * mad(values)?;
            (spread > 0.0).then(|| (center - k * spread, center + k * spread))
        }
        OutlierMethod::ZScore => {
            let center = mean(values).unwrap_or(f64::NAN);
            sample_std(values)
                .filter(|sd| *sd > 0.0)
                .map(|sd| (center - k * sd, center + k * sd))
        }
        OutlierMethod::Iqr => {
            let summary = FiveNumberSummary::from_sample(values)?;
            let iqr = summary.iqr();
            (iqr > 0.0).then(|| (summary.q1 - k * iqr, summary.q3 + k * iqr))
        }
    };
    Ok(bounds)
}

/// Indices (into `values`) that survive repeated filtering
///
/// Filtering repeats until nothing more is removed, so filtering the result
/// again is a no-op. A zero spread, or bounds that would exclude every
/// remaining value, stop the iteration and keep what is left.
fn surviving(values: &[f64], method: OutlierMethod, k: f64, group: &str) -> Result<Vec<usize>> {
    let mut kept: Vec<usize> = (0..values.len()).collect();
    loop {
        let sample: Vec<f64> = kept.iter().map(|&i| values[i]).collect();
        let Some((lo, hi)) = outlier_bounds(&sample, method, k)? else {
            if kept.len() == values.len() {
                tracing::warn!(group, method = method.name(), "zero spread; group passed through unfiltered");
            }
            return Ok(kept);
        };
        let next: Vec<usize> = kept
            .iter()
            .copied()
            .filter(|&i| (lo..=hi).contains(&values[i]))
            .collect();
        if next.len() == kept.len() {
            return Ok(kept);
        }
        if next.is_empty() {
            tracing::warn!(group, method = method.name(), "bounds exclude every value; stopping");
            return Ok(kept);
        }
        kept = next;
    }
}

pub(crate) fn filter_outliers_impl(
    df: &DataFrame,
    group_col: &str,
    value_col: &str,
    method: OutlierMethod,
    k: f64,
) -> Result<DataFrame> {
    if !(k.is_finite() && k > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "outlier cutoff must be positive, got {k}"
        )));
    }

    let keys = group_keys(df, group_col)?;
    let values = float_values(df, value_col, "value_col")?;
    let mut keep = vec![true; df.height()];

    for (key, rows) in rows_by_group(&keys) {
        // Null values are left for grouping to report
        let rows: Vec<usize> = rows.into_iter().filter(|&r| values[r].is_some()).collect();
        if rows.is_empty() {
            continue;
        }
        let sample: Vec<f64> = rows.iter().filter_map(|&r| values[r]).collect();
        let survivors = surviving(&sample, method, k, &key)?;
        let removed = rows.len() - survivors.len();
        if removed > 0 {
            for &r in &rows {
                keep[r] = false;
            }
            for i in survivors {
                keep[rows[i]] = true;
            }
            tracing::debug!(group = %key, removed, method = method.name(), "outliers removed");
        }
    }

    let mask = BooleanChunked::new(PlSmallStr::from("keep"), keep.as_slice());
    Ok(df.filter(&mask)?)
}
