//! Writing artifacts as self-contained HTML documents

use crate::output::OutputConfig;
use crate::traits::PlotArtifact;
use charming::HtmlRenderer;
use groupwise_core::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// File sink for plot artifacts
///
/// File names are derived from the plugin name, so re-running a pipeline
/// overwrites the previous artifact of the same plot.
#[derive(Debug, Clone)]
pub struct HtmlSink<'a> {
    output: &'a OutputConfig,
}

impl<'a> HtmlSink<'a> {
    pub fn new(output: &'a OutputConfig) -> Self {
        Self { output }
    }

    /// Render to an HTML string
    pub fn render(artifact: &PlotArtifact) -> Result<String> {
        let renderer = HtmlRenderer::new(
            artifact.title.as_str(),
            u64::from(artifact.width),
            u64::from(artifact.height),
        );
        renderer
            .render(&artifact.chart)
            .map_err(|e| Error::Render(format!("{e:?}")))
    }

    /// Write an artifact, consuming it; returns the path written
    pub fn write(&self, artifact: PlotArtifact) -> Result<PathBuf> {
        let path = self.output.artifact_path(&artifact.name);
        let html = Self::render(&artifact)?;
        fs::create_dir_all(self.output.directory())?;
        fs::write(&path, html)?;
        tracing::debug!(plot = %artifact.name, path = %path.display(), "artifact written");
        Ok(path)
    }
}
