//! Mann-Whitney U test (Wilcoxon rank-sum)
//!
//! Small untied samples use the exact permutation distribution of U. Everything
//! else uses the normal approximation with tie and continuity correction.

use crate::descriptive::average_ranks;
use crate::traits::{check_group_count, group_means, Analysis};
use groupwise_core::{AnalysisPayload, Comparison, Error, GroupedDataset, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Both groups must be smaller than this for the exact distribution
const EXACT_LIMIT: usize = 8;

/// Two-sided Mann-Whitney U test for exactly two groups
#[derive(Debug, Clone, Copy, Default)]
pub struct MannWhitneyAnalysis;

impl MannWhitneyAnalysis {
    /// Registered name
    pub const NAME: &'static str = "MannWhitneyAnalysis";

    /// Create a new Mann-Whitney analysis
    pub fn new() -> Self {
        Self
    }
}

/// Number of orderings of n1 + n2 distinct values giving each U in 0..=n1*n2
///
/// Built from the recurrence on whether the largest value belongs to the
/// first sample (adding n2 to U) or the second.
fn u_frequencies(n1: usize, n2: usize) -> Vec<f64> {
    // table[i][j] holds the frequencies for sample sizes (i, j)
    let mut table: Vec<Vec<Vec<f64>>> = vec![vec![Vec::new(); n2 + 1]; n1 + 1];
    for i in 0..=n1 {
        for j in 0..=n2 {
            if i == 0 || j == 0 {
                table[i][j] = vec![1.0];
                continue;
            }
            let mut freq = vec![0.0; i * j + 1];
            for (u, slot) in freq.iter_mut().enumerate() {
                if u >= j {
                    *slot += table[i - 1][j].get(u - j).copied().unwrap_or(0.0);
                }
                *slot += table[i][j - 1].get(u).copied().unwrap_or(0.0);
            }
            table[i][j] = freq;
        }
    }
    std::mem::take(&mut table[n1][n2])
}

/// Exact two-sided p-value for the larger of the two U statistics
fn exact_p_value(n1: usize, n2: usize, u_max: f64) -> f64 {
    let freq = u_frequencies(n1, n2);
    let total: f64 = freq.iter().sum();
    let start = u_max.round() as usize;
    let upper_tail: f64 = freq.iter().skip(start).sum();
    (2.0 * upper_tail / total).min(1.0)
}

/// Normal-approximation p-value with tie and continuity correction
fn asymptotic_p_value(n1: usize, n2: usize, u_max: f64, ties: &[usize]) -> Result<f64> {
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let n = n1f + n2f;
    let mu = n1f * n2f / 2.0;
    let tie_term: f64 = ties
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum();
    let variance = n1f * n2f / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if variance <= 0.0 {
        return Err(Error::degenerate_variance("pooled ranks"));
    }
    let z = (u_max - mu - 0.5) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| Error::Computation(format!("Failed to create normal distribution: {e}")))?;
    Ok((2.0 * (1.0 - normal.cdf(z))).clamp(0.0, 1.0))
}

impl Analysis for MannWhitneyAnalysis {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn maximum_groups(&self) -> Option<usize> {
        Some(2)
    }

    fn execute(&self, data: &GroupedDataset) -> Result<Comparison> {
        check_group_count(self, data, "Mann-Whitney U-Test")?;
        let groups = data.groups();
        let (a, b) = (&groups[0].values, &groups[1].values);
        let (n1, n2) = (a.len(), b.len());
        if n1 == 0 || n2 == 0 {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: n1.min(n2),
            });
        }

        let pooled: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
        let (ranks, ties) = average_ranks(&pooled);
        let rank_sum: f64 = ranks[..n1].iter().sum();
        let u1 = rank_sum - (n1 * (n1 + 1)) as f64 / 2.0;
        let u2 = (n1 * n2) as f64 - u1;
        let u_max = u1.max(u2);

        let exact = n1 < EXACT_LIMIT && n2 < EXACT_LIMIT && ties.is_empty();
        let p_value = if exact {
            exact_p_value(n1, n2, u_max)
        } else {
            asymptotic_p_value(n1, n2, u_max, &ties)?
        };

        tracing::debug!(u1, u2, p_value, exact, "Mann-Whitney U computed");

        Ok(Comparison {
            payload: AnalysisPayload::MannWhitney {
                u_statistic: u1,
                p_value,
                exact,
            },
            group_means: group_means(data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use groupwise_core::Group;

    fn two(a: &[f64], b: &[f64]) -> GroupedDataset {
        GroupedDataset::new(
            "Value",
            vec![Group::new("A", a.to_vec()), Group::new("B", b.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn test_frequencies_sum_to_binomial() {
        let freq = u_frequencies(3, 3);
        assert_eq!(freq.len(), 10);
        assert_relative_eq!(freq.iter().sum::<f64>(), 20.0);
        // Symmetric around n1*n2/2
        for u in 0..freq.len() {
            assert_relative_eq!(freq[u], freq[freq.len() - 1 - u]);
        }
        assert_eq!(freq[0], 1.0);
        assert_eq!(freq[1], 1.0);
        assert_eq!(freq[2], 2.0);
    }

    #[test]
    fn test_exact_complete_separation() {
        let result = MannWhitneyAnalysis
            .execute(&two(&[1.0, 2.0, 3.0], &[10.0, 11.0, 12.0]))
            .unwrap();
        match result.payload {
            AnalysisPayload::MannWhitney {
                u_statistic,
                p_value,
                exact,
            } => {
                assert!(exact);
                assert_relative_eq!(u_statistic, 0.0);
                // 2 * 1/20
                assert_relative_eq!(p_value, 0.1, epsilon = 1e-12);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_exact_interleaved_is_not_significant() {
        let result = MannWhitneyAnalysis
            .execute(&two(&[1.0, 4.0, 5.0], &[2.0, 3.0, 6.0]))
            .unwrap();
        assert!(result.payload.p_value() > 0.5);
    }

    #[test]
    fn test_large_samples_use_normal_approximation() {
        let a: Vec<f64> = (1..=8).map(f64::from).collect();
        let b: Vec<f64> = (9..=16).map(f64::from).collect();
        let result = MannWhitneyAnalysis.execute(&two(&a, &b)).unwrap();
        match result.payload {
            AnalysisPayload::MannWhitney { p_value, exact, .. } => {
                assert!(!exact);
                // z = 31.5 / sqrt(64 * 17 / 12)
                assert_relative_eq!(p_value, 0.000_939, epsilon = 5e-5);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_ties_force_normal_approximation() {
        let result = MannWhitneyAnalysis
            .execute(&two(&[1.0, 2.0, 2.0, 3.0], &[2.0, 3.0, 4.0, 5.0]))
            .unwrap();
        match result.payload {
            AnalysisPayload::MannWhitney { p_value, exact, .. } => {
                assert!(!exact);
                assert!(p_value > 0.0 && p_value <= 1.0);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_all_tied_is_degenerate() {
        assert!(MannWhitneyAnalysis
            .execute(&two(&[2.0, 2.0, 2.0], &[2.0, 2.0]))
            .is_err());
    }

    #[test]
    fn test_empty_group_fails() {
        assert!(MannWhitneyAnalysis.execute(&two(&[1.0, 2.0], &[])).is_err());
    }
}
