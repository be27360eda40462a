//! Core trait for group comparisons

use groupwise_core::{Comparison, Error, GroupMean, GroupedDataset, Result};

/// A statistical comparison of the value column across groups
///
/// Implementations hold no mutable state: one instance is constructed per
/// configured analysis and executed once against the shared dataset.
pub trait Analysis {
    /// Registered plugin name
    fn name(&self) -> &'static str;

    /// Minimum number of groups the comparison accepts
    fn minimum_groups(&self) -> usize {
        2
    }

    /// Maximum number of groups the comparison accepts
    fn maximum_groups(&self) -> Option<usize> {
        None
    }

    /// Run the comparison
    fn execute(&self, data: &GroupedDataset) -> Result<Comparison>;
}

/// Check the group count against an analysis' accepted range
pub fn check_group_count<A: Analysis + ?Sized>(analysis: &A, data: &GroupedDataset, label: &str) -> Result<()> {
    let n = data.len();
    let min = analysis.minimum_groups();
    match analysis.maximum_groups() {
        Some(max) if min == max && n != min => {
            Err(Error::group_count(label, &format!("exactly {min}"), n))
        }
        Some(max) if n < min || n > max => {
            Err(Error::group_count(label, &format!("between {min} and {max}"), n))
        }
        _ if n < min => Err(Error::group_count(label, &format!("at least {min}"), n)),
        _ => Ok(()),
    }
}

/// Per-group means in dataset order
pub fn group_means(data: &GroupedDataset) -> Vec<GroupMean> {
    data.groups()
        .iter()
        .map(|g| GroupMean {
            group: g.key.clone(),
            mean: g.mean().unwrap_or(f64::NAN),
        })
        .collect()
}
