//! Common test utilities for groupwise-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// Build a two-column Group/Value frame from `(key, value)` rows
pub fn grouped_df(rows: &[(&str, f64)]) -> DataFrame {
    let keys: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
    let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    df!["Group" => keys, "Value" => values].unwrap()
}

/// Frame with shared LSL/USL columns
pub fn limited_df(rows: &[(&str, f64)], lower: f64, upper: f64) -> DataFrame {
    let mut df = grouped_df(rows);
    let n = df.height();
    df.with_column(Series::new("LSL".into(), vec![lower; n])).unwrap();
    df.with_column(Series::new("USL".into(), vec![upper; n])).unwrap();
    df
}

/// Extract the value column as plain f64s
pub fn values(df: &DataFrame) -> Vec<f64> {
    df.column("Value")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}
