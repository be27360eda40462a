//! Plot runner
//!
//! Builds each configured chart and hands it straight to the HTML sink. A plot
//! that fails to render or write is recorded and the next one runs.

use crate::config::PlotSpec;
use crate::plugins::PlotFactory;
use groupwise_core::pipeline::{EventBus, PipelineContext, PipelineEvent};
use groupwise_core::{Error, PlotOutcome, PlotRecord, Registry, Result};
use groupwise_plot::{HtmlSink, PlotInput};
use std::path::PathBuf;

/// Runs configured plots against the shared plot input
pub struct PlotRunner<'a> {
    registry: &'a Registry<PlotFactory>,
}

impl<'a> PlotRunner<'a> {
    pub fn new(registry: &'a Registry<PlotFactory>) -> Self {
        Self { registry }
    }

    /// Render and write every plot in declaration order
    pub fn run_all(
        &self,
        specs: &[PlotSpec],
        input: &PlotInput<'_>,
        context: &PipelineContext,
        events: &EventBus,
    ) -> Vec<PlotRecord> {
        specs
            .iter()
            .map(|spec| self.run(spec, input, context, events))
            .collect()
    }

    pub fn run(
        &self,
        spec: &PlotSpec,
        input: &PlotInput<'_>,
        context: &PipelineContext,
        events: &EventBus,
    ) -> PlotRecord {
        let trace_id = context.trace_id;
        let outcome = match self.write(spec, input) {
            Ok(path) => {
                events.emit(
                    PipelineEvent::PlotWritten {
                        trace_id,
                        name: spec.name.clone(),
                        path: path.clone(),
                    },
                    context,
                );
                PlotOutcome::Written(path)
            }
            Err(e) => {
                let error = Error::plot(spec.name.as_str(), e);
                events.emit(
                    PipelineEvent::PlotFailed {
                        trace_id,
                        name: spec.name.clone(),
                        error: error.to_string(),
                    },
                    context,
                );
                PlotOutcome::Failed(error)
            }
        };
        PlotRecord {
            name: spec.name.clone(),
            outcome,
        }
    }

    fn write(&self, spec: &PlotSpec, input: &PlotInput<'_>) -> Result<PathBuf> {
        let factory = self.registry.resolve(&spec.name)?;
        let artifact = factory().render(input)?;
        HtmlSink::new(input.output).write(artifact)
    }
}
