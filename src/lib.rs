//! Configurable group-comparison pipelines
//!
//! `groupwise` binds a YAML pipeline definition, a style document and a table
//! into one sequential run:
//!
//! 1. the table is cleaned per group ([`preprocess`])
//! 2. the value column is partitioned by the group column
//! 3. each configured analysis runs, optionally behind a relevance gate
//! 4. each configured plot is rendered to a standalone HTML file
//!
//! Analyses and plots are resolved by name through the built-in
//! [`plugins::Registries`]; unknown names are rejected when the configuration
//! is validated.
//!
//! # Example
//!
//! ```rust,no_run
//! use groupwise::config::{load_style, AnalysisSpec, PipelineConfig};
//! use groupwise::{Pipeline, Registries};
//! use std::path::Path;
//!
//! let registries = Registries::builtin()?;
//! let mut config = PipelineConfig::default();
//! config.analyses.push(AnalysisSpec::new("TTestAnalysis"));
//! let style = load_style(Path::new("style.yaml"))?;
//!
//! let pipeline = Pipeline::new(&config, &style, &registries)?;
//! let output = pipeline.run_file(Path::new("data.csv"), &mut std::io::stdout())?;
//! println!("{}", output.report.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod plugins;
pub mod preprocess;
pub mod report;
pub mod runner;

pub use config::{AnalysisSpec, PipelineConfig, PlotSpec};
pub use pipeline::{exit_code, Pipeline, RunOutput};
pub use plugins::Registries;
pub use report::{RunReport, Summary};
