//! Partitioning a table into a `GroupedDataset`

use super::{float_values, group_keys, rows_by_group};
use crate::{Error, GroupingColumns, Result};
use groupwise_core::{DataError, Group, GroupLimits, GroupedDataset};
use polars::prelude::*;

/// First non-null limit value among a group's rows
///
/// Later values that disagree are reported once per group and ignored.
fn first_limit(values: &[Option<f64>], rows: &[usize], group: &str, column: &str) -> Option<f64> {
    let mut chosen: Option<f64> = None;
    let mut conflict = false;
    for v in rows.iter().filter_map(|&r| values[r]) {
        match chosen {
            None => chosen = Some(v),
            Some(c) if c != v => conflict = true,
            Some(_) => {}
        }
    }
    if conflict {
        tracing::warn!(group, column, chosen, "group has conflicting limit values; using the first");
    }
    chosen
}

pub(crate) fn grouped_impl(df: &DataFrame, columns: &GroupingColumns) -> Result<GroupedDataset> {
    if df.height() == 0 {
        return Err(Error::Data(DataError::EmptyTable));
    }

    let keys = group_keys(df, &columns.group)?;
    let values = float_values(df, &columns.value, "value_col")?;
    if let Some(row) = values.iter().position(Option::is_none) {
        return Err(Error::Data(DataError::NullValue {
            column: columns.value.clone(),
            row,
        }));
    }

    let limit_column = |name: &Option<String>, role: &'static str| -> Result<Option<(String, Vec<Option<f64>>)>> {
        name.as_ref()
            .map(|n| float_values(df, n, role).map(|v| (n.clone(), v)))
            .transpose()
    };
    let lower = limit_column(&columns.lower_limit, "lower_limit_col")?;
    let upper = limit_column(&columns.upper_limit, "upper_limit_col")?;
    let target = limit_column(&columns.target, "target_col")?;

    let groups = rows_by_group(&keys)
        .into_iter()
        .map(|(key, rows)| {
            let pick = |col: &Option<(String, Vec<Option<f64>>)>| {
                col.as_ref()
                    .and_then(|(name, vals)| first_limit(vals, &rows, &key, name))
            };
            let limits = GroupLimits {
                lower: pick(&lower),
                upper: pick(&upper),
                target: pick(&target),
            };
            let group_values = rows.iter().filter_map(|&r| values[r]).collect();
            Group::new(key.clone(), group_values).with_limits(limits)
        })
        .collect();

    let dataset = GroupedDataset::new(columns.value.clone(), groups)?;
    tracing::debug!(
        groups = dataset.len(),
        rows = dataset.total_len(),
        value_col = %columns.value,
        "table grouped"
    );
    Ok(dataset)
}
