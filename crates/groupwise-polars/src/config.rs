//! Configuration types for table operations

use serde::{Deserialize, Serialize};

/// Spread-based outlier bound, applied within each group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// median ± k · 1.4826 · MAD
    #[default]
    Mad,

    /// mean ± k · sd
    ZScore,

    /// [Q1 − k · IQR, Q3 + k · IQR]
    Iqr,
}

impl OutlierMethod {
    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mad => "mad",
            Self::ZScore => "zscore",
            Self::Iqr => "iqr",
        }
    }
}

/// Columns that turn a flat table into a grouped dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingColumns {
    pub group: String,
    pub value: String,
    pub lower_limit: Option<String>,
    pub upper_limit: Option<String>,
    pub target: Option<String>,
}

impl GroupingColumns {
    /// Group and value columns without limits
    pub fn new(group: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
            lower_limit: None,
            upper_limit: None,
            target: None,
        }
    }

    /// Attach lower/upper limit columns
    pub fn with_limits(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.lower_limit = Some(lower.into());
        self.upper_limit = Some(upper.into());
        self
    }

    /// Attach a target column
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}
