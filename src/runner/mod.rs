//! Sequential runners for analyses and plots

pub mod analysis;
pub mod plot;

pub use analysis::AnalysisRunner;
pub use plot::PlotRunner;
