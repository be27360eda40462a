//! Extension trait for groupwise operations on Polars DataFrames

use crate::methods::boxcox::{boxcox_global_impl, boxcox_impl};
use crate::methods::{grouping::grouped_impl, outliers::filter_outliers_impl};
use crate::{GroupingColumns, OutlierMethod, Result};
use groupwise_core::GroupedDataset;
use polars::prelude::*;

/// Extension trait that turns a loaded table into analysis input
pub trait GroupwiseFrameExt {
    /// Partition the value column by the group column
    ///
    /// # Arguments
    /// * `columns` - Group, value and optional limit columns
    ///
    /// # Returns
    /// A dataset with one group per distinct key, in first-appearance order.
    /// Limit scalars come from each group's first non-null limit value.
    ///
    /// # Errors
    /// A missing column, a non-numeric value column, a null key or value, or
    /// an empty table.
    fn grouped(&self, columns: &GroupingColumns) -> Result<GroupedDataset>;

    /// Drop rows whose value lies outside its group's outlier bounds
    ///
    /// # Arguments
    /// * `group_col` - Column containing group labels
    /// * `value_col` - Column containing values to filter
    /// * `method` - Spread measure defining the bounds
    /// * `k` - Bound width in units of the spread measure
    ///
    /// # Returns
    /// A subset of the rows, in their original order. Applying the same filter
    /// to the result removes nothing.
    fn filter_outliers(
        &self,
        group_col: &str,
        value_col: &str,
        method: OutlierMethod,
        k: f64,
    ) -> Result<DataFrame>;

    /// Box-Cox transform the value column within each group
    ///
    /// # Arguments
    /// * `group_col` - Column containing group labels
    /// * `value_col` - Column to transform
    /// * `offset` - Added after shifting a non-positive group by `|min|`
    fn boxcox(&self, group_col: &str, value_col: &str, offset: f64) -> Result<DataFrame>;

    /// Box-Cox transform the whole value column with a single fitted lambda
    fn boxcox_global(&self, value_col: &str, offset: f64) -> Result<DataFrame>;
}

impl GroupwiseFrameExt for DataFrame {
    fn grouped(&self, columns: &GroupingColumns) -> Result<GroupedDataset> {
        grouped_impl(self, columns)
    }

    fn filter_outliers(
        &self,
        group_col: &str,
        value_col: &str,
        method: OutlierMethod,
        k: f64,
    ) -> Result<DataFrame> {
        filter_outliers_impl(self, group_col, value_col, method, k)
    }

    fn boxcox(&self, group_col: &str, value_col: &str, offset: f64) -> Result<DataFrame> {
        boxcox_impl(self, group_col, value_col, offset)
    }

    fn boxcox_global(&self, value_col: &str, offset: f64) -> Result<DataFrame> {
        boxcox_global_impl(self, value_col, offset)
    }
}
