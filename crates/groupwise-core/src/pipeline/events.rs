//! Event-based pipeline notification system
//!
//! Runners publish what happens to each plugin; handlers (logging, metrics)
//! observe execution without the runners knowing about them.

use super::context::PipelineContext;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

/// Pipeline event emitted during execution
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Pipeline execution started
    PipelineStarted {
        trace_id: Uuid,
        groups: usize,
        rows: usize,
    },

    /// An analysis left the pending state
    AnalysisStarted { trace_id: Uuid, name: String },

    /// An analysis produced a statistic
    AnalysisCompleted {
        trace_id: Uuid,
        name: String,
        statistic: f64,
        p_value: f64,
        significant: bool,
    },

    /// The relevance gate skipped an analysis
    AnalysisSkipped {
        trace_id: Uuid,
        name: String,
        score: f64,
        threshold: f64,
    },

    /// An analysis raised an execution error
    AnalysisFailed {
        trace_id: Uuid,
        name: String,
        error: String,
    },

    /// A plot artifact was written
    PlotWritten {
        trace_id: Uuid,
        name: String,
        path: PathBuf,
    },

    /// A plot raised an execution error
    PlotFailed {
        trace_id: Uuid,
        name: String,
        error: String,
    },

    /// Pipeline execution completed
    PipelineCompleted { trace_id: Uuid, duration: Duration },
}

/// Trait for handling pipeline events
pub trait EventHandler {
    /// Handle a pipeline event
    fn handle_event(&self, event: &PipelineEvent, context: &PipelineContext);

    /// Check if this handler is interested in a particular event type
    fn is_interested(&self, event: &PipelineEvent) -> bool {
        let _ = event;
        true
    }

    /// Get the name of this handler for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Event bus for distributing events to multiple handlers
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler
    pub fn register<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: PipelineEvent, context: &PipelineContext) {
        for handler in &self.handlers {
            if handler.is_interested(&event) {
                handler.handle_event(&event, context);
            }
        }
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Handler that turns every event into a structured log line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHandler;

impl EventHandler for TracingHandler {
    fn handle_event(&self, event: &PipelineEvent, _context: &PipelineContext) {
        match event {
            PipelineEvent::PipelineStarted { trace_id, groups, rows } => {
                tracing::info!(%trace_id, groups, rows, "pipeline started");
            }
            PipelineEvent::AnalysisStarted { trace_id, name } => {
                tracing::debug!(%trace_id, analysis = %name, "analysis started");
            }
            PipelineEvent::AnalysisCompleted {
                trace_id,
                name,
                statistic,
                p_value,
                significant,
            } => {
                tracing::info!(%trace_id, analysis = %name, statistic, p_value, significant, "analysis completed");
            }
            PipelineEvent::AnalysisSkipped {
                trace_id,
                name,
                score,
                threshold,
            } => {
                tracing::info!(%trace_id, analysis = %name, score, threshold, "analysis skipped: not relevant");
            }
            PipelineEvent::AnalysisFailed { trace_id, name, error } => {
                tracing::warn!(%trace_id, analysis = %name, %error, "analysis failed");
            }
            PipelineEvent::PlotWritten { trace_id, name, path } => {
                tracing::info!(%trace_id, plot = %name, path = %path.display(), "plot written");
            }
            PipelineEvent::PlotFailed { trace_id, name, error } => {
                tracing::warn!(%trace_id, plot = %name, %error, "plot failed");
            }
            PipelineEvent::PipelineCompleted { trace_id, duration } => {
                tracing::info!(%trace_id, ?duration, "pipeline completed");
            }
        }
    }
}

/// Counters accumulated over a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    pub analyses_completed: usize,
    pub analyses_skipped: usize,
    pub analyses_failed: usize,
    pub significant: usize,
    pub plots_written: usize,
    pub plots_failed: usize,
}

/// Metrics collection handler
///
/// Clones share the same counters, so keep one clone to read the snapshot
/// after registering the other on a bus.
#[derive(Debug, Default, Clone)]
pub struct MetricsHandler {
    metrics: Rc<RefCell<RunMetrics>>,
}

impl MetricsHandler {
    /// Create a new metrics handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> RunMetrics {
        self.metrics.borrow().clone()
    }
}

impl EventHandler for MetricsHandler {
    fn handle_event(&self, event: &PipelineEvent, _context: &PipelineContext) {
        let mut metrics = self.metrics.borrow_mut();
        match event {
            PipelineEvent::AnalysisCompleted { significant, .. } => {
                metrics.analyses_completed += 1;
                if *significant {
                    metrics.significant += 1;
                }
            }
            PipelineEvent::AnalysisSkipped { .. } => metrics.analyses_skipped += 1,
            PipelineEvent::AnalysisFailed { .. } => metrics.analyses_failed += 1,
            PipelineEvent::PlotWritten { .. } => metrics.plots_written += 1,
            PipelineEvent::PlotFailed { .. } => metrics.plots_failed += 1,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus() {
        let mut bus = EventBus::new();
        bus.register(TracingHandler);
        assert_eq!(bus.handler_count(), 1);

        let context = PipelineContext::new();
        bus.emit(
            PipelineEvent::PipelineStarted {
                trace_id: context.trace_id,
                groups: 2,
                rows: 6,
            },
            &context,
        );
    }

    #[test]
    fn test_metrics_handler() {
        let handler = MetricsHandler::new();
        let mut bus = EventBus::new();
        bus.register(handler.clone());

        let context = PipelineContext::new();
        let trace_id = context.trace_id;
        bus.emit(
            PipelineEvent::AnalysisCompleted {
                trace_id,
                name: "TTestAnalysis".into(),
                statistic: -12.0,
                p_value: 0.001,
                significant: true,
            },
            &context,
        );
        bus.emit(
            PipelineEvent::AnalysisFailed {
                trace_id,
                name: "AnovaAnalysis".into(),
                error: "degenerate".into(),
            },
            &context,
        );
        bus.emit(
            PipelineEvent::PlotWritten {
                trace_id,
                name: "BoxPlot".into(),
                path: PathBuf::from("box_plot.html"),
            },
            &context,
        );

        let metrics = handler.snapshot();
        assert_eq!(metrics.analyses_completed, 1);
        assert_eq!(metrics.significant, 1);
        assert_eq!(metrics.analyses_failed, 1);
        assert_eq!(metrics.plots_written, 1);
        assert_eq!(metrics.plots_failed, 0);
    }
}
