//! Core types for groupwise comparison pipelines
//!
//! This crate holds what every other groupwise crate agrees on:
//!
//! - the error taxonomy ([`ConfigError`], [`DataError`], execution errors)
//! - the [`GroupedDataset`] that analyses and plots read
//! - the generic plugin [`Registry`]
//! - typed analysis and plot results
//! - the pipeline context and event bus
//!
//! # Example
//!
//! ```rust
//! use groupwise_core::{Group, GroupedDataset, PluginKind, Registry};
//!
//! let data = GroupedDataset::new(
//!     "Value",
//!     vec![Group::new("A", vec![1.0, 2.0, 3.0]), Group::new("B", vec![10.0, 11.0, 12.0])],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 2);
//!
//! let mut registry: Registry<fn() -> usize> = Registry::new(PluginKind::Analysis);
//! registry.register("Count", || 2).unwrap();
//! assert!(registry.register("Count", || 3).is_err());
//! ```

pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod result;

// Re-export core types
pub use dataset::{Group, GroupLimits, GroupedDataset};
pub use error::{ConfigError, DataError, Error, PluginKind, Result};
pub use registry::Registry;
pub use result::{
    AnalysisOutcome, AnalysisPayload, AnalysisResult, Comparison, CompletedAnalysis, GroupMean,
    PlotOutcome, PlotRecord, RelevanceAssessment, Verdict,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
