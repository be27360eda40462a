//! Grouped view of the input table
//!
//! A [`GroupedDataset`] is rebuilt from the preprocessed table on every run and
//! shared read-only by all analyses and plots.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Tolerance limits attached to a group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupLimits {
    /// Lower specification limit (LSL)
    pub lower: Option<f64>,
    /// Upper specification limit (USL)
    pub upper: Option<f64>,
    /// Target value (T)
    pub target: Option<f64>,
}

impl GroupLimits {
    /// Limits with only a lower/upper band
    pub fn band(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
            target: None,
        }
    }

    /// The `[lower, upper]` band, ordered, when both ends are known
    pub fn interval(&self) -> Option<(f64, f64)> {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) if l <= u => Some((l, u)),
            (Some(l), Some(u)) => Some((u, l)),
            _ => None,
        }
    }

    /// Whether no limit is known at all
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none() && self.target.is_none()
    }
}

/// The values of one group, in row order
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group identifier (the group column rendered as text)
    pub key: String,
    /// Values of the value column for this group
    pub values: Vec<f64>,
    /// Per-group limit scalars
    pub limits: GroupLimits,
}

impl Group {
    /// Create a group without limits
    pub fn new(key: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            key: key.into(),
            values,
            limits: GroupLimits::default(),
        }
    }

    /// Attach limits
    pub fn with_limits(mut self, limits: GroupLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the group has no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut iter = self.values.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Arithmetic mean
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Values sorted ascending
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }
}

/// Mapping from group identifier to its values, in first-appearance order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedDataset {
    value_column: String,
    groups: Vec<Group>,
}

impl GroupedDataset {
    /// Create a dataset from groups; keys must be unique
    pub fn new(value_column: impl Into<String>, groups: Vec<Group>) -> Result<Self> {
        let mut seen = HashMap::with_capacity(groups.len());
        for (i, group) in groups.iter().enumerate() {
            if let Some(prev) = seen.insert(group.key.as_str(), i) {
                return Err(Error::InvalidInput(format!(
                    "group '{}' appears at positions {prev} and {i}",
                    group.key
                )));
            }
        }
        Ok(Self {
            value_column: value_column.into(),
            groups,
        })
    }

    /// Name of the value column the groups were drawn from
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Groups in first-appearance order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look a group up by key
    pub fn get(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Group keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of observations across groups
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Limits shared by every group, if they all agree
    pub fn shared_limits(&self) -> Option<GroupLimits> {
        let first = self.groups.first()?.limits;
        self.groups
            .iter()
            .all(|g| g.limits == first)
            .then_some(first)
    }

    /// Limits to draw as reference lines: shared limits, else the first group's
    pub fn reference_limits(&self) -> GroupLimits {
        match self.shared_limits() {
            Some(limits) => limits,
            None => {
                tracing::debug!(
                    column = %self.value_column,
                    "groups disagree on limits; using the first group's for reference lines"
                );
                self.groups.first().map(|g| g.limits).unwrap_or_default()
            }
        }
    }
}
