//! Pipeline execution context
//!
//! The PipelineContext flows through all stages of a run, carrying the trace
//! id and per-stage timing information.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Context that flows through the pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Unique trace ID for this execution
    pub trace_id: Uuid,
    /// When the pipeline started
    pub start_time: Instant,
    /// Stage timing information, in the order stages ran
    stage_timings: Vec<(String, Duration)>,
    /// Free-form labels (input file, config path, ...)
    labels: HashMap<String, String>,
}

impl PipelineContext {
    /// Create a new pipeline context
    pub fn new() -> Self {
        Self::with_trace_id(Uuid::new_v4())
    }

    /// Create a context with a specific trace ID
    pub fn with_trace_id(trace_id: Uuid) -> Self {
        Self {
            trace_id,
            start_time: Instant::now(),
            stage_timings: Vec::new(),
            labels: HashMap::new(),
        }
    }

    /// Attach a label
    pub fn set_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    /// Read a label
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Record timing for a stage
    pub fn record_stage_timing(&mut self, stage: impl Into<String>, duration: Duration) {
        self.stage_timings.push((stage.into(), duration));
    }

    /// Time a stage execution
    pub fn time_stage<F, R>(&mut self, stage: impl Into<String>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let stage_name = stage.into();
        let start = Instant::now();
        let result = f();
        let duration = start.elapsed();
        tracing::debug!(stage = %stage_name, ?duration, "stage finished");
        self.record_stage_timing(stage_name, duration);
        result
    }

    /// Get total elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get stage timings
    pub fn stage_timings(&self) -> &[(String, Duration)] {
        &self.stage_timings
    }

    /// Duration of a named stage
    pub fn stage_timing(&self, stage: &str) -> Option<Duration> {
        self.stage_timings
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, d)| *d)
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = PipelineContext::new();
        assert!(ctx.stage_timings().is_empty());
        assert_ne!(ctx.trace_id, PipelineContext::new().trace_id);
    }

    #[test]
    fn test_context_timing() {
        let mut ctx = PipelineContext::new();

        let result = ctx.time_stage("test_stage", || {
            std::thread::sleep(Duration::from_millis(10));
            42
        });

        assert_eq!(result, 42);
        assert!(ctx.stage_timing("test_stage").unwrap() >= Duration::from_millis(10));
        assert_eq!(ctx.stage_timing("other"), None);
    }

    #[test]
    fn test_labels() {
        let mut ctx = PipelineContext::new();
        ctx.set_label("data", "input.csv");
        assert_eq!(ctx.label("data"), Some("input.csv"));
        assert_eq!(ctx.label("missing"), None);
    }
}
