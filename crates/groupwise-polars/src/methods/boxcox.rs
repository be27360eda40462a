//! Box-Cox transform of the value column, per group or over the whole column

use super::{float_values, group_keys, rows_by_group};
use crate::{Error, Result};
use groupwise_stats::BoxCoxFit;
use polars::prelude::*;

fn check_offset(offset: f64) -> Result<()> {
    if !(offset.is_finite() && offset > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "Box-Cox offset must be positive, got {offset}"
        )));
    }
    Ok(())
}

/// Fit one transform over the non-null `rows` and apply it in place
fn transform_rows(values: &mut [Option<f64>], rows: &[usize], scope: &str, offset: f64) -> Result<()> {
    let rows: Vec<usize> = rows.iter().copied().filter(|&r| values[r].is_some()).collect();
    let sample: Vec<f64> = rows.iter().filter_map(|&r| values[r]).collect();

    let distinct = sample.iter().any(|&v| Some(v) != sample.first().copied());
    if !distinct {
        tracing::warn!(scope, "fewer than two distinct values; Box-Cox skipped");
        return Ok(());
    }

    let fit = BoxCoxFit::fit(&sample, offset)?;
    tracing::debug!(scope, lambda = fit.lambda, shift = fit.shift, "Box-Cox fitted");
    for &r in &rows {
        values[r] = values[r].map(|v| fit.apply(v));
    }
    Ok(())
}

fn with_values(df: &DataFrame, value_col: &str, values: Vec<Option<f64>>) -> Result<DataFrame> {
    let mut out = df.clone();
    out.with_column(Series::new(PlSmallStr::from(value_col), values))?;
    Ok(out)
}

pub(crate) fn boxcox_impl(df: &DataFrame, group_col: &str, value_col: &str, offset: f64) -> Result<DataFrame> {
    check_offset(offset)?;

    let keys = group_keys(df, group_col)?;
    let mut values = float_values(df, value_col, "value_col")?;
    for (key, rows) in rows_by_group(&keys) {
        transform_rows(&mut values, &rows, &key, offset)?;
    }
    with_values(df, value_col, values)
}

pub(crate) fn boxcox_global_impl(df: &DataFrame, value_col: &str, offset: f64) -> Result<DataFrame> {
    check_offset(offset)?;

    let mut values = float_values(df, value_col, "value_col")?;
    let rows: Vec<usize> = (0..values.len()).collect();
    transform_rows(&mut values, &rows, "global", offset)?;
    with_values(df, value_col, values)
}
