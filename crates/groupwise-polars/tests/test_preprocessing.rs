//! Tests for outlier filtering and the Box-Cox step

mod common;

use approx::assert_relative_eq;
use common::{grouped_df, values};
use groupwise_polars::{GroupingColumns, GroupwiseFrameExt, OutlierMethod};
use proptest::prelude::*;

#[test]
fn test_outliers_filtered_within_each_group() {
    // 12.0 is an outlier for A but ordinary for B
    let df = grouped_df(&[
        ("A", 1.0),
        ("A", 1.2),
        ("A", 0.9),
        ("A", 1.1),
        ("A", 12.0),
        ("B", 11.0),
        ("B", 12.0),
        ("B", 13.0),
        ("B", 12.5),
    ]);
    let filtered = df
        .filter_outliers("Group", "Value", OutlierMethod::Mad, 3.0)
        .unwrap();

    assert_eq!(filtered.height(), 8);
    let data = filtered.grouped(&GroupingColumns::new("Group", "Value")).unwrap();
    assert!(!data.get("A").unwrap().values.contains(&12.0));
    assert!(data.get("B").unwrap().values.contains(&12.0));
}

#[test]
fn test_zero_spread_group_passes_through() {
    let df = grouped_df(&[("A", 5.0), ("A", 5.0), ("A", 5.0), ("B", 1.0), ("B", 2.0)]);
    for method in [OutlierMethod::Mad, OutlierMethod::ZScore, OutlierMethod::Iqr] {
        let filtered = df.filter_outliers("Group", "Value", method, 2.0).unwrap();
        assert_eq!(filtered.height(), 5, "method {}", method.name());
    }
}

#[test]
fn test_rejects_non_positive_cutoff() {
    let df = grouped_df(&[("A", 1.0), ("A", 2.0)]);
    assert!(df.filter_outliers("Group", "Value", OutlierMethod::Mad, 0.0).is_err());
    assert!(df.filter_outliers("Group", "Value", OutlierMethod::Mad, f64::NAN).is_err());
}

#[test]
fn test_filter_keeps_row_order_and_other_columns() {
    let df = grouped_df(&[("A", 1.0), ("B", 2.0), ("A", 1.5), ("B", 2.5)]);
    let filtered = df
        .filter_outliers("Group", "Value", OutlierMethod::ZScore, 3.0)
        .unwrap();
    assert_eq!(values(&filtered), vec![1.0, 2.0, 1.5, 2.5]);
    assert_eq!(filtered.width(), 2);
}

#[test]
fn test_boxcox_transforms_each_group() {
    let df = grouped_df(&[
        ("A", 1.0),
        ("A", 2.0),
        ("A", 4.0),
        ("A", 8.0),
        ("B", -1.0),
        ("B", 0.0),
        ("B", 3.0),
        ("C", 7.0),
        ("C", 7.0),
    ]);
    let transformed = df.boxcox("Group", "Value", 1.0).unwrap();
    let out = values(&transformed);

    assert_eq!(out.len(), 9);
    assert!(out.iter().all(|v| v.is_finite()));
    // Monotone within a group
    assert!(out[0] < out[1] && out[1] < out[2] && out[2] < out[3]);
    assert!(out[4] < out[5] && out[5] < out[6]);
    // Constant group untouched
    assert_relative_eq!(out[7], 7.0);
    assert_relative_eq!(out[8], 7.0);
}

#[test]
fn test_boxcox_rejects_bad_offset() {
    let df = grouped_df(&[("A", 1.0), ("A", 2.0)]);
    assert!(df.boxcox("Group", "Value", -1.0).is_err());
    assert!(df.boxcox_global("Value", 0.0).is_err());
}

#[test]
fn test_boxcox_global_uses_one_lambda() {
    let rows = [
        ("A", 1.0),
        ("A", 2.0),
        ("A", 4.0),
        ("B", -1.0),
        ("B", 0.0),
        ("B", 3.0),
        ("C", 7.0),
        ("C", 7.0),
    ];
    let df = grouped_df(&rows);
    let out = values(&df.boxcox_global("Value", 1.0).unwrap());

    let raw: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    let fit = groupwise_stats::BoxCoxFit::fit(&raw, 1.0).unwrap();
    for (got, x) in out.iter().zip(&raw) {
        assert_relative_eq!(*got, fit.apply(*x), epsilon = 1e-12);
    }
    // Order across groups survives a single transform
    assert!(out[3] < out[4] && out[4] < out[0] && out[2] < out[6]);
    assert_relative_eq!(out[6], out[7]);
    assert_ne!(out, values(&df.boxcox("Group", "Value", 1.0).unwrap()));
}

#[test]
fn test_boxcox_global_constant_column_passes_through() {
    let df = grouped_df(&[("A", 5.0), ("B", 5.0), ("B", 5.0)]);
    assert_eq!(values(&df.boxcox_global("Value", 1.0).unwrap()), vec![5.0, 5.0, 5.0]);
}

proptest! {
    #[test]
    fn prop_outlier_filter_is_idempotent(
        rows in prop::collection::vec((0usize..3, -50.0f64..50.0), 1..40),
        method_idx in 0usize..3,
        k in 0.5f64..4.0,
    ) {
        let labels = ["A", "B", "C"];
        let method = [OutlierMethod::Mad, OutlierMethod::ZScore, OutlierMethod::Iqr][method_idx];
        let rows: Vec<(&str, f64)> = rows.iter().map(|(g, v)| (labels[*g], *v)).collect();
        let df = grouped_df(&rows);

        let once = df.filter_outliers("Group", "Value", method, k).unwrap();
        let twice = once.filter_outliers("Group", "Value", method, k).unwrap();

        prop_assert!(once.height() <= df.height());
        prop_assert_eq!(values(&once), values(&twice));
    }
}
