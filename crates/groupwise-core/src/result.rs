//! Typed results produced by the analysis and plot runners

use crate::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Kind-specific statistics of a completed comparison
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    /// One-way analysis of variance
    Anova {
        f_statistic: f64,
        p_value: f64,
        df_between: f64,
        df_within: f64,
    },
    /// Two-sample t-test
    TTest {
        t_statistic: f64,
        p_value: f64,
        df: f64,
        /// Welch's unequal-variance form (false: pooled Student form)
        welch: bool,
    },
    /// Two-sided Mann-Whitney U test
    MannWhitney {
        u_statistic: f64,
        p_value: f64,
        /// Exact null distribution (false: normal approximation)
        exact: bool,
    },
}

impl AnalysisPayload {
    /// Human-readable test label
    pub fn test_name(&self) -> &'static str {
        match self {
            Self::Anova { .. } => "ANOVA",
            Self::TTest { .. } => "T-Test",
            Self::MannWhitney { .. } => "Mann-Whitney U-Test",
        }
    }

    /// Name of the test statistic
    pub fn statistic_name(&self) -> &'static str {
        match self {
            Self::Anova { .. } => "F",
            Self::TTest { .. } => "t",
            Self::MannWhitney { .. } => "U",
        }
    }

    /// Value of the test statistic
    pub fn statistic(&self) -> f64 {
        match *self {
            Self::Anova { f_statistic, .. } => f_statistic,
            Self::TTest { t_statistic, .. } => t_statistic,
            Self::MannWhitney { u_statistic, .. } => u_statistic,
        }
    }

    /// Two-sided p-value
    pub fn p_value(&self) -> f64 {
        match *self {
            Self::Anova { p_value, .. }
            | Self::TTest { p_value, .. }
            | Self::MannWhitney { p_value, .. } => p_value,
        }
    }
}

/// Mean of one group, reported alongside every comparison
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
}

/// What an analysis computes over a grouped dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub payload: AnalysisPayload,
    pub group_means: Vec<GroupMean>,
}

/// Outcome of a relevance gate evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceAssessment {
    /// Policy that produced the score
    pub policy: &'static str,
    /// Policy score; larger means more relevant
    pub score: f64,
    /// Configured threshold
    pub threshold: f64,
}

impl RelevanceAssessment {
    /// Relevant iff the score reaches the threshold
    pub fn is_relevant(&self) -> bool {
        self.score >= self.threshold
    }
}

/// A comparison that ran to completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAnalysis {
    pub comparison: Comparison,
    /// p-value below the configured significance level
    pub significant: bool,
    /// Present when the gate was evaluated
    pub relevance: Option<RelevanceAssessment>,
}

impl CompletedAnalysis {
    /// One-line interpretation for reports
    pub fn message(&self) -> &'static str {
        match (self.significant, self.relevance.is_some()) {
            (false, _) => "No statistically significant difference",
            (true, true) => "Significant and relevant",
            (true, false) => "Significant",
        }
    }
}

/// Terminal state of one analysis
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Gate passed (or bypassed) and the comparison completed
    Completed(CompletedAnalysis),
    /// Gate evaluated and the comparison was not relevant
    Skipped(RelevanceAssessment),
    /// Gate or comparison raised an execution error
    Failed(Error),
}

/// Coarse verdict for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ran,
    SkippedNotRelevant,
    Failed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Ran => "ran",
            Verdict::SkippedNotRelevant => "skipped-not-relevant",
            Verdict::Failed => "failed",
        })
    }
}

/// Result of one configured analysis, in declaration order
#[derive(Debug)]
pub struct AnalysisResult {
    /// Registered analysis name
    pub name: String,
    pub outcome: AnalysisOutcome,
}

impl AnalysisResult {
    /// Coarse verdict
    pub fn verdict(&self) -> Verdict {
        match self.outcome {
            AnalysisOutcome::Completed(_) => Verdict::Ran,
            AnalysisOutcome::Skipped(_) => Verdict::SkippedNotRelevant,
            AnalysisOutcome::Failed(_) => Verdict::Failed,
        }
    }

    /// The completed comparison, if any
    pub fn completed(&self) -> Option<&CompletedAnalysis> {
        match &self.outcome {
            AnalysisOutcome::Completed(c) => Some(c),
            _ => None,
        }
    }

    /// The execution error, if any
    pub fn error(&self) -> Option<&Error> {
        match &self.outcome {
            AnalysisOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Terminal state of one plot
#[derive(Debug)]
pub enum PlotOutcome {
    /// Artifact written to this path
    Written(PathBuf),
    Failed(Error),
}

/// Result of one configured plot, in declaration order
#[derive(Debug)]
pub struct PlotRecord {
    pub name: String,
    pub outcome: PlotOutcome,
}

impl PlotRecord {
    /// Path of the written artifact
    pub fn path(&self) -> Option<&PathBuf> {
        match &self.outcome {
            PlotOutcome::Written(p) => Some(p),
            PlotOutcome::Failed(_) => None,
        }
    }
}
