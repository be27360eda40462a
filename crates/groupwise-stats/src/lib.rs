//! Group comparison tests for groupwise pipelines
//!
//! This crate provides the statistical side of a groupwise run: the
//! [`Analysis`] capability every comparison plugin implements, the built-in
//! comparisons, and the relevance gate that decides whether a comparison is
//! worth running at all.
//!
//! # Supported Analyses
//!
//! - **ANOVA**: one-way analysis of variance over two or more groups
//! - **T-Test**: Welch's two-sample t-test (pooled when a group is a singleton)
//! - **Mann-Whitney U**: rank-based two-sample test, exact for small untied samples
//!
//! # Relevance policies
//!
//! - **overlap**: smallest fraction of a group's range inside its tolerance band
//! - **mean_difference**: spread of group means relative to the band width
//!
//! # Examples
//!
//! ```rust
//! use groupwise_core::{Group, GroupLimits, GroupedDataset};
//! use groupwise_stats::{Analysis, RelevanceGate, RelevancePolicyKind, TTestAnalysis};
//!
//! let band = GroupLimits::band(0.0, 5.0);
//! let data = GroupedDataset::new(
//!     "Value",
//!     vec![
//!         Group::new("A", vec![1.0, 2.0, 3.0]).with_limits(band),
//!         Group::new("B", vec![10.0, 11.0, 12.0]).with_limits(band),
//!     ],
//! )
//! .unwrap();
//!
//! let comparison = TTestAnalysis.execute(&data).unwrap();
//! assert!(comparison.payload.p_value() < 0.01);
//!
//! let gate = RelevanceGate::new(RelevancePolicyKind::Overlap, 0.9);
//! assert!(!gate.is_relevant(&data).unwrap());
//! ```

pub mod anova;
pub mod boxcox;
pub mod descriptive;
pub mod mann_whitney;
pub mod relevance;
pub mod traits;
pub mod ttest;

pub use anova::AnovaAnalysis;
pub use boxcox::BoxCoxFit;
pub use descriptive::FiveNumberSummary;
pub use mann_whitney::MannWhitneyAnalysis;
pub use relevance::{MeanDifference, RangeOverlap, RelevanceGate, RelevancePolicy, RelevancePolicyKind};
pub use traits::Analysis;
pub use ttest::TTestAnalysis;
