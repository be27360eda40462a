//! Built-in plugin table
//!
//! Every analysis and plot the binary knows about is listed here once. The
//! registries are built from these tables at startup and only read afterwards.

use groupwise_core::{ConfigError, PluginKind, Registry};
use groupwise_plot::{BoxPlot, CumulativeFrequencyPlot, Plot, SignificancePlot};
use groupwise_stats::{Analysis, AnovaAnalysis, MannWhitneyAnalysis, TTestAnalysis};

/// Constructs a fresh analysis instance
pub type AnalysisFactory = fn() -> Box<dyn Analysis>;

/// Constructs a fresh plot instance
pub type PlotFactory = fn() -> Box<dyn Plot>;

fn anova() -> Box<dyn Analysis> {
    Box::new(AnovaAnalysis)
}

fn ttest() -> Box<dyn Analysis> {
    Box::new(TTestAnalysis)
}

fn mann_whitney() -> Box<dyn Analysis> {
    Box::new(MannWhitneyAnalysis)
}

fn box_plot() -> Box<dyn Plot> {
    Box::new(BoxPlot)
}

fn cumulative_frequency() -> Box<dyn Plot> {
    Box::new(CumulativeFrequencyPlot)
}

fn significance() -> Box<dyn Plot> {
    Box::new(SignificancePlot)
}

/// Registered analyses
pub const BUILTIN_ANALYSES: &[(&str, AnalysisFactory)] = &[
    (AnovaAnalysis::NAME, anova),
    (TTestAnalysis::NAME, ttest),
    (MannWhitneyAnalysis::NAME, mann_whitney),
];

/// Registered plots
pub const BUILTIN_PLOTS: &[(&str, PlotFactory)] = &[
    (BoxPlot::NAME, box_plot),
    (CumulativeFrequencyPlot::NAME, cumulative_frequency),
    (SignificancePlot::NAME, significance),
];

/// The two plugin namespaces
#[derive(Debug, Clone)]
pub struct Registries {
    pub analyses: Registry<AnalysisFactory>,
    pub plots: Registry<PlotFactory>,
}

impl Registries {
    /// Registries holding exactly the built-in tables
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_tables(BUILTIN_ANALYSES, BUILTIN_PLOTS)
    }

    /// Registries built from arbitrary tables
    pub fn from_tables(
        analyses: &[(&str, AnalysisFactory)],
        plots: &[(&str, PlotFactory)],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            analyses: Registry::from_table(PluginKind::Analysis, analyses.iter().copied())?,
            plots: Registry::from_table(PluginKind::Plot, plots.iter().copied())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registries = Registries::builtin().unwrap();
        assert_eq!(
            registries.analyses.names().collect::<Vec<_>>(),
            vec!["AnovaAnalysis", "TTestAnalysis", "MannWhitneyAnalysis"]
        );
        assert!(registries.plots.contains("BoxPlot"));
        assert!(registries.plots.contains("CumulativeFrequencyPlot"));
    }

    #[test]
    fn test_factories_build_named_instances() {
        let registries = Registries::builtin().unwrap();
        for (name, _) in BUILTIN_ANALYSES {
            let factory = registries.analyses.resolve(name).unwrap();
            assert_eq!(factory().name(), *name);
        }
        for (name, _) in BUILTIN_PLOTS {
            let factory = registries.plots.resolve(name).unwrap();
            assert_eq!(factory().name(), *name);
        }
    }

    #[test]
    fn test_duplicate_table_entry_rejected() {
        let err = Registries::from_tables(&[("AnovaAnalysis", anova), ("AnovaAnalysis", ttest)], &[])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRegistration { .. }));
    }

    #[test]
    fn test_namespaces_are_independent() {
        let registries = Registries::builtin().unwrap();
        assert!(registries.plots.resolve("AnovaAnalysis").is_err());
        assert!(registries.analyses.resolve("BoxPlot").is_err());
    }
}
