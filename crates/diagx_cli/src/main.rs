mod args;
mod classify;
mod config;
mod inputs;
mod logging;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use diagx_engine::{write_json, BatchProcessor, Report};
use diagx_logging::{diagx_info, diagx_warn};
use serde::Serialize;

use crate::args::Args;
use crate::config::CliConfig;

/// What ends up on disk: the report plus when it was produced.
#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_utc: String,
    total_files: usize,
    #[serde(flatten)]
    report: &'a Report,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CliConfig::default(),
    };
    let config = config.with_overrides(&args);
    config.validate().context("invalid configuration")?;

    logging::initialize(config.log_level_filter(), config.log_file.as_deref());

    let uploads = inputs::collect_uploads(&args.inputs).context("reading input files")?;
    if uploads.is_empty() {
        diagx_warn!("No recognized input files");
        anyhow::bail!("no input files to process");
    }
    diagx_info!("Collected {} upload(s)", uploads.len());

    let processor = BatchProcessor::new(&config.extract_settings())
        .context("resolving candidate encodings")?;
    let report = processor.run(&uploads).context("staging uploads")?;

    let document = ReportDocument {
        generated_utc: Utc::now().to_rfc3339(),
        total_files: report.summary().total_files(),
        report: &report,
    };
    write_json(&args.output, &document)
        .with_context(|| format!("writing report {}", args.output.display()))?;

    diagx_info!(
        "Wrote {} table(s) and {} summary row(s) to {}",
        report.sheets().len(),
        document.total_files,
        args.output.display()
    );
    Ok(())
}
