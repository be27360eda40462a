//! Pipeline infrastructure shared by the runners
//!
//! The actual runners live in the `groupwise` crate; this module provides the
//! execution context and the event bus they report through.

pub mod context;
pub mod events;

// Re-export commonly used types
pub use context::PipelineContext;
pub use events::{EventBus, EventHandler, MetricsHandler, PipelineEvent, RunMetrics, TracingHandler};
