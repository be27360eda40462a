use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "groupwise")]
#[command(about = "Compare a value column across groups with configurable analyses and charts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the configured analyses and plots over a table
    Run {
        /// Pipeline configuration
        #[arg(short, long, default_value = "config.yaml", env = "GROUPWISE_CONFIG")]
        config: PathBuf,

        /// Style document (required to exist)
        #[arg(short, long, default_value = "style.yaml", env = "GROUPWISE_STYLE")]
        style: PathBuf,

        /// Input CSV, overriding `data_file` in the configuration
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Directory for plot artifacts, overriding `output.output_directory`
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Load and validate both documents without reading any data
    Validate {
        #[arg(short, long, default_value = "config.yaml", env = "GROUPWISE_CONFIG")]
        config: PathBuf,

        #[arg(short, long, default_value = "style.yaml", env = "GROUPWISE_STYLE")]
        style: PathBuf,
    },

    /// List registered analyses and plots
    Plugins,
}
