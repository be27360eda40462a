//! Two-sample t-test

use crate::descriptive::{mean, sample_variance};
use crate::traits::{check_group_count, group_means, Analysis};
use groupwise_core::{AnalysisPayload, Comparison, Error, GroupedDataset, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Independent two-sample t-test for exactly two groups
///
/// Uses Welch's unequal-variance form. When one group holds a single
/// observation its variance is undefined, and the test falls back to the pooled
/// Student form with n1 + n2 - 2 degrees of freedom.
#[derive(Debug, Clone, Copy, Default)]
pub struct TTestAnalysis;

impl TTestAnalysis {
    /// Registered name
    pub const NAME: &'static str = "TTestAnalysis";

    /// Create a new t-test analysis
    pub fn new() -> Self {
        Self
    }
}

/// t statistic, degrees of freedom and whether Welch's form was used
fn t_statistic(a: &[f64], b: &[f64]) -> Result<(f64, f64, bool)> {
    let (n1, n2) = (a.len(), b.len());
    if n1 == 0 || n2 == 0 || n1 + n2 < 3 {
        return Err(Error::InsufficientData {
            expected: 3,
            actual: n1 + n2,
        });
    }
    let m1 = mean(a).unwrap_or_default();
    let m2 = mean(b).unwrap_or_default();
    let (n1f, n2f) = (n1 as f64, n2 as f64);

    match (sample_variance(a), sample_variance(b)) {
        (Some(v1), Some(v2)) => {
            let se1 = v1 / n1f;
            let se2 = v2 / n2f;
            let se_sq = se1 + se2;
            if se_sq <= 0.0 {
                return Err(Error::degenerate_variance("both groups"));
            }
            let df = se_sq.powi(2) / (se1.powi(2) / (n1f - 1.0) + se2.powi(2) / (n2f - 1.0));
            Ok(((m1 - m2) / se_sq.sqrt(), df, true))
        }
        (v1, v2) => {
            tracing::debug!(n1, n2, "single-observation group; using pooled t-test");
            let ss1 = v1.unwrap_or(0.0) * (n1f - 1.0);
            let ss2 = v2.unwrap_or(0.0) * (n2f - 1.0);
            let df = n1f + n2f - 2.0;
            let pooled = (ss1 + ss2) / df;
            if pooled <= 0.0 {
                return Err(Error::degenerate_variance("pooled sample"));
            }
            let se = (pooled * (1.0 / n1f + 1.0 / n2f)).sqrt();
            Ok(((m1 - m2) / se, df, false))
        }
    }
}

impl Analysis for TTestAnalysis {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn maximum_groups(&self) -> Option<usize> {
        Some(2)
    }

    fn execute(&self, data: &GroupedDataset) -> Result<Comparison> {
        check_group_count(self, data, "T-Test")?;
        let groups = data.groups();
        let (t, df, welch) = t_statistic(&groups[0].values, &groups[1].values)?;

        let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
            Error::Computation(format!("Failed to create t-distribution: {e}"))
        })?;
        let p_value = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);

        Ok(Comparison {
            payload: AnalysisPayload::TTest {
                t_statistic: t,
                p_value,
                df,
                welch,
            },
            group_means: group_means(data),
        })
    }
}
