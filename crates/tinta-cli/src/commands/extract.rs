use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tinta_core::io::image_io::save_frame_png;
use tinta_core::io::rvf::RvfReader;

#[derive(Args)]
pub struct ExtractArgs {
    /// Input RVF video file
    pub file: PathBuf,

    /// Frame index to export (0-based)
    #[arg(long, default_value = "0")]
    pub frame: usize,

    /// Output PNG path
    #[arg(short, long, default_value = "frame.png")]
    pub output: PathBuf,
}

pub fn run(args: &ExtractArgs) -> Result<()> {
    let reader = RvfReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let frame = reader.read_frame(args.frame)?;

    save_frame_png(&frame, &args.output)?;
    println!(
        "Exported frame {} ({}x{}) to {}",
        args.frame,
        frame.width(),
        frame.height(),
        args.output.display()
    );

    Ok(())
}
