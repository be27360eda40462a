//! One-way analysis of variance

use crate::descriptive::mean;
use crate::traits::{check_group_count, group_means, Analysis};
use groupwise_core::{AnalysisPayload, Comparison, Error, GroupedDataset, Result};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// One-way ANOVA across two or more groups
///
/// F = MS_between / MS_within with (k - 1, N - k) degrees of freedom.
/// Every group needs at least two observations so that its variance is defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnovaAnalysis;

impl AnovaAnalysis {
    /// Registered name
    pub const NAME: &'static str = "AnovaAnalysis";

    /// Create a new ANOVA analysis
    pub fn new() -> Self {
        Self
    }
}

impl Analysis for AnovaAnalysis {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, data: &GroupedDataset) -> Result<Comparison> {
        check_group_count(self, data, "ANOVA")?;

        for group in data.groups() {
            if group.len() < 2 {
                return Err(Error::Computation(format!(
                    "group '{}' has {} observation(s); variance is undefined",
                    group.key,
                    group.len()
                )));
            }
        }

        let k = data.len();
        let n_total = data.total_len();
        let all: Vec<f64> = data
            .groups()
            .iter()
            .flat_map(|g| g.values.iter().copied())
            .collect();
        let grand_mean = mean(&all).ok_or(Error::InsufficientData {
            expected: 2 * k,
            actual: 0,
        })?;

        let mut ss_between = 0.0;
        let mut ss_within = 0.0;
        for group in data.groups() {
            let m = group.mean().unwrap_or(grand_mean);
            ss_between += group.len() as f64 * (m - grand_mean).powi(2);
            ss_within += group.values.iter().map(|x| (x - m).powi(2)).sum::<f64>();
        }

        if ss_within <= 0.0 {
            return Err(Error::degenerate_variance("within-group variation"));
        }

        let df_between = (k - 1) as f64;
        let df_within = (n_total - k) as f64;
        let f_statistic = (ss_between / df_between) / (ss_within / df_within);
        if !f_statistic.is_finite() {
            return Err(Error::Computation(format!(
                "F statistic is not finite ({f_statistic}); check '{}' for NaN or infinite values",
                data.value_column()
            )));
        }

        let dist = FisherSnedecor::new(df_between, df_within).map_err(|e| {
            Error::Computation(format!("Failed to create F-distribution: {e}"))
        })?;
        let p_value = (1.0 - dist.cdf(f_statistic)).clamp(0.0, 1.0);

        tracing::debug!(f_statistic, p_value, df_between, df_within, "ANOVA computed");

        Ok(Comparison {
            payload: AnalysisPayload::Anova {
                f_statistic,
                p_value,
                df_between,
                df_within,
            },
            group_means: group_means(data),
        })
    }
}
