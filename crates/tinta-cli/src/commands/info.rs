use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tinta_core::io::rvf::RvfReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input RVF video file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = RvfReader::open(&args.file)?;
    let header = &reader.header;

    println!("File:        {}", args.file.display());
    println!("Frames:      {}", header.frame_count);
    println!("Dimensions:  {}x{}", header.width, header.height);
    println!(
        "Channels:    {} ({})",
        header.channels,
        if header.channels == 1 { "mono" } else { "RGB" }
    );
    println!("Frame rate:  {:.2} fps", header.fps);
    if header.fps > 0.0 {
        let seconds = header.frame_count as f64 / header.fps;
        println!("Duration:    {seconds:.2} s");
    }

    let frame_bytes = header.frame_byte_size();
    let total_mb = (frame_bytes * header.frame_count as usize) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {total_mb:.1} MB");

    Ok(())
}
