use anyhow::{Context, Result};
use clap::Parser;
use groupwise::cli::{Cli, Commands};
use groupwise::config::{load_style, PipelineConfig};
use groupwise::{exit_code, Pipeline, Registries};
use groupwise_core::{ConfigError, Error};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(classify(&e))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn classify(error: &anyhow::Error) -> u8 {
    if error.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    error
        .downcast_ref::<Error>()
        .map_or(1, |e| exit_code(e) as u8)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            style,
            data,
            output_dir,
        } => handle_run(&config, &style, data, output_dir),
        Commands::Validate { config, style } => handle_validate(&config, &style),
        Commands::Plugins => handle_plugins(),
    }
}

fn handle_run(
    config_path: &Path,
    style_path: &Path,
    data: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let registries = Registries::builtin()?;
    let mut config = PipelineConfig::load(config_path)?;
    let style = load_style(style_path)?;

    if let Some(dir) = output_dir {
        config.output.output_directory = dir;
    }
    let data_file = data
        .or_else(|| config.data_file.clone())
        .ok_or_else(|| ConfigError::InvalidField {
            field: "data_file".to_string(),
            message: "no input table given; set data_file or pass --data".to_string(),
        })?;

    let pipeline = Pipeline::new(&config, &style, &registries)?;
    let output = pipeline
        .run_file(&data_file, &mut std::io::stdout().lock())
        .with_context(|| format!("running pipeline on {}", data_file.display()))?;

    tracing::debug!(
        trace_id = %output.context.trace_id,
        timings = ?output.context.stage_timings(),
        metrics = ?output.metrics,
        "run finished"
    );
    Ok(())
}

fn handle_validate(config_path: &Path, style_path: &Path) -> Result<()> {
    let registries = Registries::builtin()?;
    let config = PipelineConfig::load(config_path)?;
    load_style(style_path)?;
    config.validate(&registries)?;
    println!(
        "{} and {} are valid: {} analyses, {} plots",
        config_path.display(),
        style_path.display(),
        config.analyses.len(),
        config.plots.len()
    );
    Ok(())
}

fn handle_plugins() -> Result<()> {
    let registries = Registries::builtin()?;
    println!("Analyses:");
    for name in registries.analyses.names() {
        println!("  {name}");
    }
    println!("Plots:");
    for name in registries.plots.names() {
        println!("  {name}");
    }
    Ok(())
}
