//! Relevance gating against per-group tolerance limits
//!
//! A [`RelevancePolicy`] reduces a grouped dataset and its limits to a single
//! score. The [`RelevanceGate`] compares that score with the configured
//! threshold: an analysis is relevant iff `score >= threshold`, so raising the
//! threshold can only turn a run into a skip.

use groupwise_core::{Error, Group, GroupedDataset, RelevanceAssessment, Result};
use serde::{Deserialize, Serialize};

/// Scoring rule for the relevance gate
pub trait RelevancePolicy {
    /// Policy name as written in configuration
    fn name(&self) -> &'static str;

    /// Score the dataset; larger means more relevant
    fn score(&self, data: &GroupedDataset) -> Result<f64>;
}

fn band_of(group: &Group) -> Result<(f64, f64)> {
    group.limits.interval().ok_or_else(|| {
        Error::InvalidInput(format!(
            "group '{}' has no lower/upper limit values",
            group.key
        ))
    })
}

/// Fraction of each group's observed range inside its limit band
///
/// The gate score is the smallest fraction over all groups. A group whose
/// values are all equal scores 1 when that value is inside the band and 0
/// otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeOverlap;

impl RangeOverlap {
    /// Overlap fraction of one group
    pub fn group_overlap(group: &Group) -> Result<f64> {
        let (lower, upper) = band_of(group)?;
        let (min, max) = group.range().ok_or(Error::InsufficientData {
            expected: 1,
            actual: 0,
        })?;

        let width = max - min;
        if width <= 0.0 {
            return Ok(if (lower..=upper).contains(&min) { 1.0 } else { 0.0 });
        }
        let inside = (max.min(upper) - min.max(lower)).max(0.0);
        Ok((inside / width).clamp(0.0, 1.0))
    }
}

impl RelevancePolicy for RangeOverlap {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn score(&self, data: &GroupedDataset) -> Result<f64> {
        let mut score = f64::INFINITY;
        for group in data.groups() {
            let overlap = Self::group_overlap(group)?;
            tracing::debug!(group = %group.key, overlap, "range overlap");
            score = score.min(overlap);
        }
        if score.is_finite() {
            Ok(score)
        } else {
            Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            })
        }
    }
}

/// Spread of the group means relative to the tolerance band width
///
/// Uses the widest band across groups; a zero-width band scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanDifference;

impl RelevancePolicy for MeanDifference {
    fn name(&self) -> &'static str {
        "mean_difference"
    }

    fn score(&self, data: &GroupedDataset) -> Result<f64> {
        let mut width: f64 = 0.0;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for group in data.groups() {
            let (lower, upper) = band_of(group)?;
            width = width.max(upper - lower);
            let mean = group.mean().ok_or(Error::InsufficientData {
                expected: 1,
                actual: 0,
            })?;
            lo = lo.min(mean);
            hi = hi.max(mean);
        }
        if width <= 0.0 || !lo.is_finite() {
            return Ok(0.0);
        }
        Ok((hi - lo) / width)
    }
}

/// Policy selector as it appears in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevancePolicyKind {
    /// [`RangeOverlap`]
    #[default]
    Overlap,
    /// [`MeanDifference`]
    MeanDifference,
}

impl RelevancePolicyKind {
    /// The policy implementation
    pub fn policy(self) -> &'static dyn RelevancePolicy {
        match self {
            Self::Overlap => &RangeOverlap,
            Self::MeanDifference => &MeanDifference,
        }
    }
}

/// Threshold decision over a relevance policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceGate {
    pub policy: RelevancePolicyKind,
    pub threshold: f64,
}

impl RelevanceGate {
    /// Create a gate
    pub fn new(policy: RelevancePolicyKind, threshold: f64) -> Self {
        Self { policy, threshold }
    }

    /// Score the dataset and pair the score with the threshold
    pub fn evaluate(&self, data: &GroupedDataset) -> Result<RelevanceAssessment> {
        let policy = self.policy.policy();
        let score = policy.score(data)?;
        Ok(RelevanceAssessment {
            policy: policy.name(),
            score,
            threshold: self.threshold,
        })
    }

    /// Shorthand for `evaluate(..)?.is_relevant()`
    pub fn is_relevant(&self, data: &GroupedDataset) -> Result<bool> {
        Ok(self.evaluate(data)?.is_relevant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use groupwise_core::GroupLimits;
    use proptest::prelude::*;

    fn banded(groups: &[(&str, &[f64])], lower: f64, upper: f64) -> GroupedDataset {
        GroupedDataset::new(
            "Value",
            groups
                .iter()
                .map(|(k, v)| Group::new(*k, v.to_vec()).with_limits(GroupLimits::band(lower, upper)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_group_outside_band_scores_zero() {
        let data = banded(&[("A", &[1.0, 2.0, 3.0]), ("B", &[10.0, 11.0, 12.0])], 0.0, 5.0);
        let gate = RelevanceGate::new(RelevancePolicyKind::Overlap, 0.9);
        let assessment = gate.evaluate(&data).unwrap();
        assert_relative_eq!(assessment.score, 0.0);
        assert_eq!(assessment.policy, "overlap");
        assert!(!assessment.is_relevant());
    }

    #[test]
    fn test_partial_overlap() {
        let data = banded(&[("A", &[0.0, 10.0]), ("B", &[2.0, 4.0])], 5.0, 20.0);
        // A: [5, 10] of [0, 10] inside; B: nothing inside
        assert_relative_eq!(RangeOverlap::group_overlap(&data.groups()[0]).unwrap(), 0.5);
        assert_relative_eq!(RangeOverlap.score(&data).unwrap(), 0.0);

        let data = banded(&[("A", &[0.0, 10.0]), ("B", &[6.0, 8.0])], 5.0, 20.0);
        assert_relative_eq!(RangeOverlap.score(&data).unwrap(), 0.5);
    }

    #[test]
    fn test_degenerate_range() {
        let inside = Group::new("A", vec![3.0, 3.0]).with_limits(GroupLimits::band(0.0, 5.0));
        let outside = Group::new("B", vec![7.0]).with_limits(GroupLimits::band(0.0, 5.0));
        assert_relative_eq!(RangeOverlap::group_overlap(&inside).unwrap(), 1.0);
        assert_relative_eq!(RangeOverlap::group_overlap(&outside).unwrap(), 0.0);
    }

    #[test]
    fn test_reversed_band_is_ordered() {
        let group = Group::new("A", vec![1.0, 3.0]).with_limits(GroupLimits::band(5.0, 0.0));
        assert_relative_eq!(RangeOverlap::group_overlap(&group).unwrap(), 1.0);
    }

    #[test]
    fn test_missing_limits_is_an_error() {
        let data = GroupedDataset::new(
            "Value",
            vec![
                Group::new("A", vec![1.0, 2.0]).with_limits(GroupLimits::band(0.0, 5.0)),
                Group::new("B", vec![1.0, 2.0]),
            ],
        )
        .unwrap();
        let err = RelevanceGate::new(RelevancePolicyKind::Overlap, 0.5)
            .evaluate(&data)
            .unwrap_err();
        assert!(err.to_string().contains("'B'"));
    }

    #[test]
    fn test_mean_difference_policy() {
        let data = banded(&[("A", &[1.0, 2.0, 3.0]), ("B", &[4.0, 5.0, 6.0])], 0.0, 10.0);
        let gate = RelevanceGate::new(RelevancePolicyKind::MeanDifference, 0.25);
        let assessment = gate.evaluate(&data).unwrap();
        assert_relative_eq!(assessment.score, 0.3);
        assert!(assessment.is_relevant());

        let zero_width = banded(&[("A", &[1.0]), ("B", &[4.0])], 2.0, 2.0);
        assert_relative_eq!(MeanDifference.score(&zero_width).unwrap(), 0.0);
    }

    #[test]
    fn test_policy_kind_deserializes_snake_case() {
        let kind: RelevancePolicyKind = serde_yaml::from_str("mean_difference").unwrap();
        assert_eq!(kind, RelevancePolicyKind::MeanDifference);
        let kind: RelevancePolicyKind = serde_yaml::from_str("overlap").unwrap();
        assert_eq!(kind, RelevancePolicyKind::Overlap);
    }

    proptest! {
        #[test]
        fn prop_gate_is_monotone_in_threshold(
            a in prop::collection::vec(-20.0f64..20.0, 1..12),
            b in prop::collection::vec(-20.0f64..20.0, 1..12),
            lower in -10.0f64..0.0,
            upper in 0.0f64..10.0,
            t1 in 0.0f64..=1.0,
            t2 in 0.0f64..=1.0,
        ) {
            let (lo_t, hi_t) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            let data = banded(&[("A", &a), ("B", &b)], lower, upper);
            for kind in [RelevancePolicyKind::Overlap, RelevancePolicyKind::MeanDifference] {
                let strict = RelevanceGate::new(kind, hi_t).is_relevant(&data).unwrap();
                let loose = RelevanceGate::new(kind, lo_t).is_relevant(&data).unwrap();
                prop_assert!(!strict || loose);
            }
        }

        #[test]
        fn prop_overlap_score_in_unit_interval(
            values in prop::collection::vec(-50.0f64..50.0, 1..20),
            lower in -30.0f64..30.0,
            width in 0.0f64..40.0,
        ) {
            let group = Group::new("A", values).with_limits(GroupLimits::band(lower, lower + width));
            let overlap = RangeOverlap::group_overlap(&group).unwrap();
            prop_assert!((0.0..=1.0).contains(&overlap));
        }
    }
}
