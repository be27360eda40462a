//! Chart plugins for groupwise pipelines
//!
//! Every plot implements the single [`Plot`] capability: read the shared
//! [`PlotInput`] and return a [`PlotArtifact`]. Artifacts are written by the
//! [`HtmlSink`] as standalone HTML files named after the plot.
//!
//! # Built-in plots
//!
//! - **BoxPlot**: one box per group with LSL/USL/T reference lines
//! - **CumulativeFrequencyPlot**: empirical CDF per group with vertical limit lines
//! - **SignificancePlot**: −log10(p) of every completed analysis against alpha

pub mod box_plot;
pub mod chart;
pub mod cumulative;
pub mod output;
pub mod significance;
pub mod sink;
pub mod style;
pub mod traits;

pub use box_plot::BoxPlot;
pub use cumulative::CumulativeFrequencyPlot;
pub use output::{snake_case, OutputConfig};
pub use significance::SignificancePlot;
pub use sink::HtmlSink;
pub use style::{AxisStyle, LimitKind, LimitStyle, LimitsStyle, StyleConfig};
pub use traits::{Plot, PlotArtifact, PlotInput};
