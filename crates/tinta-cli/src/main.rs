mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinta", about = "Video filter pipeline tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show video container metadata
    Info(commands::info::InfoArgs),
    /// Apply a filter chain to every frame of a video
    Run(commands::run::RunArgs),
    /// Export a single decoded frame as PNG
    Extract(commands::extract::ExtractArgs),
    /// Show past runs from the usage-report log
    History(commands::history::HistoryArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Extract(args) => commands::extract::run(args),
        Commands::History(args) => commands::history::run(args),
    }
}
