//! Table cleaning before grouping
//!
//! Steps are pure: each takes a table by reference and returns a new one.
//! Every step works within groups, except a Box-Cox step marked `global`.

use crate::config::Preprocessing;
use groupwise_core::Result;
use groupwise_polars::{GroupwiseFrameExt, OutlierMethod};
use polars::prelude::DataFrame;

/// One cleaning step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Drop per-group outliers
    FilterOutliers { method: OutlierMethod, k: f64 },
    /// Box-Cox transform of the value column, per group unless `global`
    BoxCox { offset: f64, global: bool },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::FilterOutliers { .. } => "outlier_removal",
            Step::BoxCox { .. } => "boxcox",
        }
    }

    /// Apply to `table`, leaving it untouched
    pub fn apply(&self, table: &DataFrame, group_col: &str, value_col: &str) -> Result<DataFrame> {
        let out = match *self {
            Step::FilterOutliers { method, k } => {
                table.filter_outliers(group_col, value_col, method, k)?
            }
            Step::BoxCox { offset, global: false } => table.boxcox(group_col, value_col, offset)?,
            Step::BoxCox { offset, global: true } => table.boxcox_global(value_col, offset)?,
        };
        Ok(out)
    }
}

/// Ordered cleaning steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preprocessor {
    steps: Vec<Step>,
}

impl Preprocessor {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Steps enabled in the configuration; outlier removal precedes Box-Cox
    pub fn from_config(config: &Preprocessing) -> Self {
        let mut steps = Vec::new();
        if config.outlier_removal.enabled {
            steps.push(Step::FilterOutliers {
                method: config.outlier_removal.method,
                k: config.outlier_removal.sigma_cutoff,
            });
        }
        if config.boxcox.enabled {
            steps.push(Step::BoxCox {
                offset: config.boxcox.offset,
                global: config.boxcox.global,
            });
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step in order
    pub fn apply(&self, table: &DataFrame, group_col: &str, value_col: &str) -> Result<DataFrame> {
        let mut current = table.clone();
        for step in &self.steps {
            let before = current.height();
            current = step.apply(&current, group_col, value_col)?;
            tracing::debug!(
                step = step.name(),
                rows_before = before,
                rows_after = current.height(),
                "preprocessing step applied"
            );
        }
        Ok(current)
    }
}
