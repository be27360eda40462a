//! Pipeline and style configuration
//!
//! Both documents are YAML. The pipeline document is optional on disk (a
//! missing file falls back to [`PipelineConfig::default`]); the style document
//! is mandatory. Unknown fields are rejected while parsing, and everything that
//! depends on the plugin registries is checked by [`PipelineConfig::validate`]
//! before any data is read.

use crate::plugins::Registries;
use groupwise_core::ConfigError;
use groupwise_plot::{OutputConfig, StyleConfig};
use groupwise_polars::{GroupingColumns, OutlierMethod};
use groupwise_stats::RelevancePolicyKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default relevance threshold for an analysis
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.25;

/// Default significance level
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

fn default_report_name() -> String {
    "report".to_string()
}

fn default_sigma_cutoff() -> f64 {
    3.0
}

fn default_offset() -> f64 {
    1.0
}

fn default_relevance_threshold() -> f64 {
    DEFAULT_RELEVANCE_THRESHOLD
}

fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

fn default_plots() -> Vec<PlotSpec> {
    vec![PlotSpec::new("BoxPlot"), PlotSpec::new("CumulativeFrequencyPlot")]
}

/// Descriptive information printed with the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportInfo {
    #[serde(default = "default_report_name")]
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for ReportInfo {
    fn default() -> Self {
        Self {
            name: default_report_name(),
            author: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutlierRemoval {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub method: OutlierMethod,
    /// Bound width in units of the method's spread measure
    #[serde(default = "default_sigma_cutoff")]
    pub sigma_cutoff: f64,
}

impl Default for OutlierRemoval {
    fn default() -> Self {
        Self {
            enabled: false,
            method: OutlierMethod::default(),
            sigma_cutoff: default_sigma_cutoff(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxCoxSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Added after shifting a non-positive group by `|min|`
    #[serde(default = "default_offset")]
    pub offset: f64,
    /// Fit one lambda over the whole column instead of one per group
    #[serde(default)]
    pub global: bool,
}

impl Default for BoxCoxSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            offset: default_offset(),
            global: false,
        }
    }
}

/// Data cleaning applied before grouping, outlier removal first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preprocessing {
    #[serde(default)]
    pub outlier_removal: OutlierRemoval,
    #[serde(default)]
    pub boxcox: BoxCoxSettings,
}

/// One configured analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSpec {
    pub name: String,
    /// Run the relevance gate before the analysis
    #[serde(default)]
    pub relevance: bool,
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
    #[serde(default)]
    pub relevance_policy: RelevancePolicyKind,
}

impl AnalysisSpec {
    /// An ungated analysis
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relevance: false,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            relevance_policy: RelevancePolicyKind::default(),
        }
    }

    /// Gate the analysis at `threshold`
    pub fn gated(mut self, threshold: f64) -> Self {
        self.relevance = true;
        self.relevance_threshold = threshold;
        self
    }
}

/// One configured plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotSpec {
    pub name: String,
}

impl PlotSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The validated pipeline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub report: ReportInfo,
    /// Input table; the command line may override it
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    pub group_col: String,
    pub value_col: String,
    #[serde(default)]
    pub lower_limit_col: Option<String>,
    #[serde(default)]
    pub upper_limit_col: Option<String>,
    #[serde(default)]
    pub target_col: Option<String>,
    #[serde(default)]
    pub preprocessing: Preprocessing,
    #[serde(default)]
    pub analyses: Vec<AnalysisSpec>,
    /// Alpha for the `significant` flag
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    #[serde(default = "default_plots")]
    pub plots: Vec<PlotSpec>,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            report: ReportInfo::default(),
            data_file: None,
            group_col: "Group".to_string(),
            value_col: "Value".to_string(),
            lower_limit_col: None,
            upper_limit_col: None,
            target_col: None,
            preprocessing: Preprocessing::default(),
            analyses: Vec::new(),
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            plots: default_plots(),
            output: OutputConfig::default(),
        }
    }
}

fn parse_yaml<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        field: field.into(),
        message: message.into(),
    }
}

fn require_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "column name must not be empty"));
    }
    Ok(())
}

fn require_optional_name(field: &str, value: Option<&str>) -> Result<(), ConfigError> {
    value.map_or(Ok(()), |v| require_name(field, v))
}

impl PipelineConfig {
    /// Parse a YAML document; `origin` only labels error messages
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        parse_yaml(content, origin)
    }

    /// Read and parse a config file
    ///
    /// A missing file yields the default configuration with a warning. Any
    /// other read or parse failure is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content, path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "config file not found, using default configuration"
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Check everything that parsing alone cannot
    ///
    /// Runs before any data is touched, so every failure here points at a
    /// field of the document rather than at the input table.
    pub fn validate(&self, registries: &Registries) -> Result<(), ConfigError> {
        require_name("group_col", &self.group_col)?;
        require_name("value_col", &self.value_col)?;
        require_optional_name("lower_limit_col", self.lower_limit_col.as_deref())?;
        require_optional_name("upper_limit_col", self.upper_limit_col.as_deref())?;
        require_optional_name("target_col", self.target_col.as_deref())?;

        let has_limits = self.lower_limit_col.is_some() && self.upper_limit_col.is_some();
        for (index, spec) in self.analyses.iter().enumerate() {
            registries.analyses.resolve(&spec.name)?;
            if !(0.0..=1.0).contains(&spec.relevance_threshold) {
                return Err(ConfigError::InvalidThreshold {
                    analysis: spec.name.clone(),
                    index,
                    value: spec.relevance_threshold,
                });
            }
            if spec.relevance && !has_limits {
                return Err(ConfigError::MissingLimitColumns {
                    analysis: spec.name.clone(),
                    index,
                });
            }
        }

        for spec in &self.plots {
            registries.plots.resolve(&spec.name)?;
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(invalid(
                "significance_level",
                format!("{} must be in (0, 1)", self.significance_level),
            ));
        }
        if self.output.width == 0 {
            return Err(invalid("output.width", "must be positive"));
        }
        if self.output.height == 0 {
            return Err(invalid("output.height", "must be positive"));
        }

        let outliers = &self.preprocessing.outlier_removal;
        if !(outliers.sigma_cutoff.is_finite() && outliers.sigma_cutoff > 0.0) {
            return Err(invalid(
                "preprocessing.outlier_removal.sigma_cutoff",
                format!("{} must be positive", outliers.sigma_cutoff),
            ));
        }
        let offset = self.preprocessing.boxcox.offset;
        if !(offset.is_finite() && offset > 0.0) {
            return Err(invalid(
                "preprocessing.boxcox.offset",
                format!("{offset} must be positive"),
            ));
        }
        Ok(())
    }

    /// Columns the table is grouped by
    pub fn grouping_columns(&self) -> GroupingColumns {
        GroupingColumns {
            group: self.group_col.clone(),
            value: self.value_col.clone(),
            lower_limit: self.lower_limit_col.clone(),
            upper_limit: self.upper_limit_col.clone(),
            target: self.target_col.clone(),
        }
    }
}

/// Read the mandatory style document
pub fn load_style(path: &Path) -> Result<StyleConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::MissingStyleFile {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;
    parse_yaml(&content, path)
}
