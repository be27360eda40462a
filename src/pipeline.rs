//! End-to-end run: load, preprocess, group, analyse, plot, report
//!
//! Configuration problems surface from [`Pipeline::new`] before any data is
//! touched. Data problems surface once, at grouping time. Past that point every
//! analysis and plot failure is recorded in the [`RunReport`] and the run
//! carries on.

use crate::config::PipelineConfig;
use crate::plugins::Registries;
use crate::preprocess::Preprocessor;
use crate::report::RunReport;
use crate::runner::{AnalysisRunner, PlotRunner};
use groupwise_core::pipeline::{
    EventBus, MetricsHandler, PipelineContext, PipelineEvent, RunMetrics, TracingHandler,
};
use groupwise_core::{ConfigError, Error, Result};
use groupwise_plot::{PlotInput, StyleConfig};
use groupwise_polars::{read_csv, GroupwiseFrameExt};
use polars::prelude::DataFrame;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// A validated pipeline, ready to run against any number of tables
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    style: &'a StyleConfig,
    registries: &'a Registries,
    preprocessor: Preprocessor,
}

/// What a run returns besides the console output
#[derive(Debug)]
pub struct RunOutput {
    pub report: RunReport,
    pub metrics: RunMetrics,
    pub context: PipelineContext,
}

impl<'a> Pipeline<'a> {
    /// Validate the configuration against the registries
    pub fn new(
        config: &'a PipelineConfig,
        style: &'a StyleConfig,
        registries: &'a Registries,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate(registries)?;
        Ok(Self {
            config,
            style,
            registries,
            preprocessor: Preprocessor::from_config(&config.preprocessing),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        self.config
    }

    /// Load a CSV file and run against it
    pub fn run_file<W: Write>(&self, path: &Path, console: &mut W) -> Result<RunOutput> {
        let mut context = PipelineContext::new();
        context.set_label("data_file", path.display().to_string());
        let table = context.time_stage("load", || read_csv(path))?;
        self.execute(&table, context, console)
    }

    /// Run against an already loaded table
    pub fn run_table<W: Write>(&self, table: &DataFrame, console: &mut W) -> Result<RunOutput> {
        self.execute(table, PipelineContext::new(), console)
    }

    fn execute<W: Write>(
        &self,
        table: &DataFrame,
        mut context: PipelineContext,
        console: &mut W,
    ) -> Result<RunOutput> {
        let config = self.config;
        context.set_label("report", config.report.name.as_str());

        let metrics = MetricsHandler::new();
        let mut events = EventBus::new();
        events.register(TracingHandler);
        events.register(metrics.clone());

        let cleaned = context.time_stage("preprocess", || {
            self.preprocessor
                .apply(table, &config.group_col, &config.value_col)
        })?;
        let columns = config.grouping_columns();
        let data = context.time_stage("group", || cleaned.grouped(&columns))?;

        events.emit(
            PipelineEvent::PipelineStarted {
                trace_id: context.trace_id,
                groups: data.len(),
                rows: data.total_len(),
            },
            &context,
        );

        let analysis_runner =
            AnalysisRunner::new(&self.registries.analyses, config.significance_level);
        let started = Instant::now();
        let analyses = analysis_runner.run_all(&config.analyses, &data, &context, &events);
        context.record_stage_timing("analyses", started.elapsed());

        writeln!(console, "== {} ==", config.report.name)?;
        RunReport::write_analyses(&analyses, console)?;

        let input = PlotInput {
            data: &data,
            style: self.style,
            output: &config.output,
            analyses: &analyses,
            significance_level: config.significance_level,
        };
        let plot_runner = PlotRunner::new(&self.registries.plots);
        let started = Instant::now();
        let plots = plot_runner.run_all(&config.plots, &input, &context, &events);
        context.record_stage_timing("plots", started.elapsed());

        let duration = context.elapsed();
        events.emit(
            PipelineEvent::PipelineCompleted {
                trace_id: context.trace_id,
                duration,
            },
            &context,
        );

        let report = RunReport {
            info: config.report.clone(),
            analyses,
            plots,
            duration,
        };
        report.write_plots_and_summary(console)?;

        if config.output.save_report {
            if let Err(e) = report.save_html(&config.output) {
                tracing::warn!(error = %e, "failed to write html report");
            }
        }

        Ok(RunOutput {
            report,
            metrics: metrics.snapshot(),
            context,
        })
    }
}

/// Map a fatal run error onto the process exit code
pub fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Config(_) => 2,
        Error::Data(_) => 3,
        _ => 1,
    }
}
