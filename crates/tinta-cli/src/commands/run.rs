use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tinta_core::filters::brightness::DEFAULT_BRIGHTNESS_LEVEL;
use tinta_core::pipeline::config::{
    build_chain, CancelPolicy, FilterKind, PipelineConfig, WorkerConfig, DEFAULT_PARALLELISM,
};
use tinta_core::pipeline::{run_pipeline, RunStatus};
use tinta_core::report::ReportManager;
use tracing::warn;

use crate::summary::{print_run_header, print_run_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Input RVF video file
    pub file: PathBuf,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Filter stage, repeatable, applied in order:
    /// grayscale, invert, brightness[=LEVEL]
    #[arg(short, long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Worker threads for frame jobs
    #[arg(long, default_value_t = DEFAULT_PARALLELISM)]
    pub workers: usize,

    /// Keep partially processed output if the run is cancelled
    #[arg(long)]
    pub keep_partial: bool,

    /// Skip the usage-report entry for this run
    #[arg(long)]
    pub no_report: bool,

    /// Output file path (default: <input>_<timestamp>_filtered.rvf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        build_config_from_args(args)?
    };

    print_run_header(&config);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );

    let bar = pb.clone();
    let summary = run_pipeline(&config, move |stage, fraction| {
        bar.set_message(stage.to_string());
        bar.set_position((fraction * 100.0) as u64);
    })?;

    pb.finish_with_message("Done");
    print_run_summary(&summary);

    if summary.status == RunStatus::Succeeded && !args.no_report {
        let names = build_chain(&config.filters).names();
        let report = ReportManager::default();
        if let Err(e) = report.append_entry(Local::now(), &config.input, &names) {
            warn!(error = %e, "Failed to append report entry");
        }
    }

    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<PipelineConfig> {
    let mut filters = Vec::with_capacity(args.filters.len());
    for raw in &args.filters {
        filters.push(parse_filter(raw)?);
    }

    Ok(PipelineConfig {
        input: args.file.clone(),
        output: args.output.clone(),
        filters,
        workers: WorkerConfig {
            parallelism: args.workers,
        },
        cancel_policy: if args.keep_partial {
            CancelPolicy::KeepPartial
        } else {
            CancelPolicy::Abort
        },
    })
}

fn parse_filter(raw: &str) -> Result<FilterKind> {
    let (name, value) = match raw.split_once('=') {
        Some((n, v)) => (n.trim(), Some(v.trim())),
        None => (raw.trim(), None),
    };

    match name.to_ascii_lowercase().as_str() {
        "grayscale" | "greyscale" => Ok(FilterKind::Grayscale),
        "invert" | "invert-colors" => Ok(FilterKind::InvertColors),
        "brightness" => {
            let level = value
                .map(|v| v.parse::<i16>())
                .transpose()
                .context("Invalid brightness level")?
                .unwrap_or(DEFAULT_BRIGHTNESS_LEVEL);
            if !(-255..=255).contains(&level) {
                bail!("Brightness level must be in -255..=255, got {level}");
            }
            Ok(FilterKind::Brightness { level })
        }
        other => bail!("Unknown filter: {other} (expected grayscale, invert, or brightness[=LEVEL])"),
    }
}
