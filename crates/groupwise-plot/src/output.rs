//! Output sizing and file placement

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

/// The `output` section of the pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// Prepended to every artifact file name as `{prefix}_`
    #[serde(default)]
    pub filename_prefix: Option<String>,
    /// Also write an HTML overview of the run
    #[serde(default)]
    pub save_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output_directory: default_output_directory(),
            filename_prefix: None,
            save_report: false,
        }
    }
}

impl OutputConfig {
    /// Deterministic artifact path for a plugin name
    ///
    /// `BoxPlot` becomes `{dir}/{prefix_}box_plot.html`.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.output_directory.join(self.file_name(&snake_case(name)))
    }

    /// File name with the configured prefix and an `.html` extension
    pub fn file_name(&self, stem: &str) -> String {
        match self.filename_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}_{stem}.html"),
            _ => format!("{stem}.html"),
        }
    }

    /// Directory artifacts are written to
    pub fn directory(&self) -> &Path {
        &self.output_directory
    }
}

/// `CumulativeFrequencyPlot` -> `cumulative_frequency_plot`
///
/// Runs of capitals stay together (`HTMLPlot` -> `html_plot`).
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}
