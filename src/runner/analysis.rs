//! Analysis runner
//!
//! Per analysis: `Pending -> gate check -> Skipped | Running -> Completed | Failed`.
//! A failure is recorded against its own entry and the next analysis runs.

use crate::config::AnalysisSpec;
use crate::plugins::AnalysisFactory;
use groupwise_core::pipeline::{EventBus, PipelineContext, PipelineEvent};
use groupwise_core::{
    AnalysisOutcome, AnalysisResult, CompletedAnalysis, Error, GroupedDataset, Registry, Result,
};
use groupwise_stats::RelevanceGate;

/// Runs configured analyses against one grouped dataset
pub struct AnalysisRunner<'a> {
    registry: &'a Registry<AnalysisFactory>,
    significance_level: f64,
}

impl<'a> AnalysisRunner<'a> {
    pub fn new(registry: &'a Registry<AnalysisFactory>, significance_level: f64) -> Self {
        Self {
            registry,
            significance_level,
        }
    }

    /// Run every spec in declaration order
    ///
    /// Always returns one result per configured analysis, in the same order.
    pub fn run_all(
        &self,
        specs: &[AnalysisSpec],
        data: &GroupedDataset,
        context: &PipelineContext,
        events: &EventBus,
    ) -> Vec<AnalysisResult> {
        specs
            .iter()
            .map(|spec| self.run(spec, data, context, events))
            .collect()
    }

    /// Run one analysis and publish its outcome
    pub fn run(
        &self,
        spec: &AnalysisSpec,
        data: &GroupedDataset,
        context: &PipelineContext,
        events: &EventBus,
    ) -> AnalysisResult {
        let trace_id = context.trace_id;
        events.emit(
            PipelineEvent::AnalysisStarted {
                trace_id,
                name: spec.name.clone(),
            },
            context,
        );

        let outcome = match self.evaluate(spec, data) {
            Ok(outcome) => outcome,
            Err(e) => AnalysisOutcome::Failed(Error::analysis(spec.name.as_str(), e)),
        };

        let event = match &outcome {
            AnalysisOutcome::Completed(done) => PipelineEvent::AnalysisCompleted {
                trace_id,
                name: spec.name.clone(),
                statistic: done.comparison.payload.statistic(),
                p_value: done.comparison.payload.p_value(),
                significant: done.significant,
            },
            AnalysisOutcome::Skipped(assessment) => PipelineEvent::AnalysisSkipped {
                trace_id,
                name: spec.name.clone(),
                score: assessment.score,
                threshold: assessment.threshold,
            },
            AnalysisOutcome::Failed(e) => PipelineEvent::AnalysisFailed {
                trace_id,
                name: spec.name.clone(),
                error: e.to_string(),
            },
        };
        events.emit(event, context);

        AnalysisResult {
            name: spec.name.clone(),
            outcome,
        }
    }

    fn evaluate(&self, spec: &AnalysisSpec, data: &GroupedDataset) -> Result<AnalysisOutcome> {
        let factory = self.registry.resolve(&spec.name)?;
        let analysis = factory();

        let relevance = if spec.relevance {
            let gate = RelevanceGate::new(spec.relevance_policy, spec.relevance_threshold);
            let assessment = gate.evaluate(data)?;
            if !assessment.is_relevant() {
                return Ok(AnalysisOutcome::Skipped(assessment));
            }
            Some(assessment)
        } else {
            None
        };

        let comparison = analysis.execute(data)?;
        let significant = comparison.payload.p_value() < self.significance_level;
        Ok(AnalysisOutcome::Completed(CompletedAnalysis {
            comparison,
            significant,
            relevance,
        }))
    }
}
