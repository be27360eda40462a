//! Common test utilities for groupwise pipeline tests

#![allow(dead_code)]

use groupwise::config::{AnalysisSpec, PipelineConfig, PlotSpec};
use groupwise_plot::OutputConfig;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// `{A: [1, 2, 3], B: [10, 11, 12]}`
pub fn separated_df() -> DataFrame {
    df![
        "Group" => ["A", "A", "A", "B", "B", "B"],
        "Value" => [1.0, 2.0, 3.0, 10.0, 11.0, 12.0]
    ]
    .unwrap()
}

/// `separated_df` with an `[LSL, USL]` band on every row
pub fn banded_df(lower: f64, upper: f64) -> DataFrame {
    let mut df = separated_df();
    let n = df.height();
    df.with_column(Series::new("LSL".into(), vec![lower; n])).unwrap();
    df.with_column(Series::new("USL".into(), vec![upper; n])).unwrap();
    df
}

/// Group B holds a single value
pub fn singleton_df() -> DataFrame {
    df![
        "Group" => ["A", "A", "A", "B"],
        "Value" => [1.0, 2.0, 3.0, 7.0]
    ]
    .unwrap()
}

/// Config writing into `dir` with the given analyses and plots
pub fn config(dir: &Path, analyses: Vec<AnalysisSpec>, plots: &[&str]) -> PipelineConfig {
    PipelineConfig {
        analyses,
        plots: plots.iter().map(|p| PlotSpec::new(*p)).collect(),
        output: OutputConfig {
            output_directory: dir.to_path_buf(),
            ..OutputConfig::default()
        },
        ..PipelineConfig::default()
    }
}

/// Same as [`config`] with LSL/USL limit columns configured
pub fn banded_config(dir: &Path, analyses: Vec<AnalysisSpec>, plots: &[&str]) -> PipelineConfig {
    let mut config = config(dir, analyses, plots);
    config.lower_limit_col = Some("LSL".to_string());
    config.upper_limit_col = Some("USL".to_string());
    config
}

/// Write a text file under `dir`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Names of the files in `dir`, sorted
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
