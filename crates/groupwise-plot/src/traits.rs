//! The plot capability and what it consumes and produces

use crate::{OutputConfig, StyleConfig};
use charming::Chart;
use groupwise_core::{AnalysisResult, GroupedDataset, Result};

/// Everything a plot may read; shared read-only across all plots of a run
#[derive(Debug, Clone, Copy)]
pub struct PlotInput<'a> {
    pub data: &'a GroupedDataset,
    pub style: &'a StyleConfig,
    pub output: &'a OutputConfig,
    /// Results of the analysis stage, in declaration order
    pub analyses: &'a [AnalysisResult],
    pub significance_level: f64,
}

/// A rendered chart not yet written anywhere
///
/// Owned by the plot runner until handed to a sink, which consumes it.
pub struct PlotArtifact {
    /// Plugin name that produced the chart; drives the file name
    pub name: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub chart: Chart,
}

impl std::fmt::Debug for PlotArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotArtifact")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// A chart generator
pub trait Plot {
    /// Registered plugin name
    fn name(&self) -> &'static str;

    /// Build the chart
    fn render(&self, input: &PlotInput<'_>) -> Result<PlotArtifact>;
}
