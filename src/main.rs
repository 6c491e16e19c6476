use anyhow::{Context, Result};
use clap::Parser;
use skillscope::cli::{Cli, OutputFormat};
use skillscope::{artifacts, config::AnalysisConfig, csv_output::CsvOutput, dataset, pipeline};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the level to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from file (if given) and apply CLI overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.clusters == Some(0) {
        anyhow::bail!("Invalid value for --clusters: 0 (must be >= 1)");
    }
    if args.iterations == Some(0) {
        anyhow::bail!("Invalid value for --iterations: 0 (must be >= 1)");
    }

    init_tracing(args.debug);

    let config = load_config(&args)?;

    let loaded = dataset::load_path(&args.input, args.input_format, config.input.max_bytes)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    let report = pipeline::analyze(&loaded.dataset, &config)?;
    let output = report.to_json_output(Some(&loaded.sha256));

    // Render and write everything only after the whole run succeeded
    if !args.no_write {
        let written = artifacts::save_all(&args.out_dir, &output)
            .with_context(|| format!("Failed to write artifacts to {}", args.out_dir.display()))?;
        tracing::info!(files = written.len(), dir = %args.out_dir.display(), "artifacts written");
    }

    if let Some(path) = &args.export_csv {
        fs::write(path, CsvOutput::from_dataset(&loaded.dataset).to_csv()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    if let Some(path) = &args.personas_csv {
        fs::write(path, CsvOutput::from_personas(&report.personas).to_csv()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }

    Ok(())
}
