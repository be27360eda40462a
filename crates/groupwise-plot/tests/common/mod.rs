//! Common test utilities for groupwise-plot tests

#![allow(dead_code)]

use groupwise_core::{
    AnalysisOutcome, AnalysisPayload, AnalysisResult, Comparison, CompletedAnalysis, Group,
    GroupLimits, GroupedDataset,
};

/// Two groups sharing a [0, 5] band with target 2.5
pub fn banded_dataset() -> GroupedDataset {
    let limits = GroupLimits {
        lower: Some(0.0),
        upper: Some(5.0),
        target: Some(2.5),
    };
    GroupedDataset::new(
        "Value",
        vec![
            Group::new("A", vec![1.0, 2.0, 3.0]).with_limits(limits),
            Group::new("B", vec![10.0, 11.0, 12.0]).with_limits(limits),
        ],
    )
    .unwrap()
}

/// A completed t-test result
pub fn completed(name: &str, p_value: f64) -> AnalysisResult {
    AnalysisResult {
        name: name.to_string(),
        outcome: AnalysisOutcome::Completed(CompletedAnalysis {
            comparison: Comparison {
                payload: AnalysisPayload::TTest {
                    t_statistic: -11.0,
                    p_value,
                    df: 4.0,
                    welch: true,
                },
                group_means: Vec::new(),
            },
            significant: p_value < 0.05,
            relevance: None,
        }),
    }
}
