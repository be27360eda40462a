//! Error types for groupwise pipelines
//!
//! The taxonomy separates fatal, pre-run failures ([`ConfigError`], [`DataError`])
//! from per-plugin execution failures that the runners record and step past.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The two independent plugin namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Statistical comparisons
    Analysis,
    /// Chart generators
    Plot,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginKind::Analysis => f.write_str("analysis"),
            PluginKind::Plot => f.write_str("plot"),
        }
    }
}

/// Configuration problems, always detected before any analysis or plot runs
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No factory registered under this name
    #[error("unknown {kind} plugin '{name}'")]
    UnknownPlugin { kind: PluginKind, name: String },

    /// Two plugins claimed the same name within one registry
    #[error("{kind} plugin '{name}' is registered more than once")]
    DuplicateRegistration { kind: PluginKind, name: String },

    /// Relevance threshold outside [0, 1]
    #[error("analyses[{index}] ({analysis}): relevance_threshold {value} must be in [0, 1]")]
    InvalidThreshold {
        analysis: String,
        index: usize,
        value: f64,
    },

    /// Relevance requested without limit columns to evaluate it against
    #[error("analyses[{index}] ({analysis}): relevance requires lower_limit_col and upper_limit_col")]
    MissingLimitColumns { analysis: String, index: usize },

    /// The style document is mandatory
    #[error("style file not found: {}", path.display())]
    MissingStyleFile { path: PathBuf },

    /// Malformed YAML or a field of the wrong type
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A field that parsed but holds an unusable value
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

/// Problems with the input table, detected once at grouping time
#[derive(Error, Debug)]
pub enum DataError {
    /// A configured column is absent from the table
    #[error("column '{column}' ({role}) not found in input table")]
    MissingColumn { column: String, role: &'static str },

    /// A column that must hold numbers does not
    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    /// A group key or value is missing
    #[error("column '{column}' has a null value at row {row}")]
    NullValue { column: String, row: usize },

    /// Nothing to analyse
    #[error("input table has no rows")]
    EmptyTable,

    /// Reported by the table library
    #[error("table error: {0}")]
    Table(String),
}

/// Core error type for groupwise operations
#[derive(Error, Debug)]
pub enum Error {
    /// Fatal configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal data error
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// One analysis failed; the pipeline continues
    #[error("analysis '{analysis}' failed: {source}")]
    AnalysisExecution {
        analysis: String,
        #[source]
        source: Box<Error>,
    },

    /// One plot failed; the pipeline continues
    #[error("plot '{plot}' failed: {source}")]
    PlotExecution {
        plot: String,
        #[source]
        source: Box<Error>,
    },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Rendering a chart failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an error raised while executing an analysis
    pub fn analysis(analysis: impl Into<String>, source: Error) -> Self {
        Self::AnalysisExecution {
            analysis: analysis.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an error raised while building or writing a plot
    pub fn plot(plot: impl Into<String>, source: Error) -> Self {
        Self::PlotExecution {
            plot: plot.into(),
            source: Box::new(source),
        }
    }

    /// Create an error for a degenerate variance
    pub fn degenerate_variance(context: &str) -> Self {
        Self::Computation(format!("{context} has zero variance"))
    }

    /// Create an error for a wrong number of groups
    pub fn group_count(test: &str, expected: &str, actual: usize) -> Self {
        Self::InvalidInput(format!(
            "{test} requires {expected} groups, got {actual}"
        ))
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Data(_))
    }
}
