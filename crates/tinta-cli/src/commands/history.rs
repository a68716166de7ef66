use anyhow::Result;
use clap::Args;
use console::Style;
use tinta_core::report::ReportManager;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show only the most recent N entries
    #[arg(long)]
    pub last: Option<usize>,
}

pub fn run(args: &HistoryArgs) -> Result<()> {
    let report = ReportManager::default();
    let mut entries = report.read_entries()?;

    if entries.is_empty() {
        println!("No report entries at {}", report.path().display());
        return Ok(());
    }

    if let Some(last) = args.last {
        let skip = entries.len().saturating_sub(last);
        entries.drain(..skip);
    }

    let time_style = Style::new().dim();
    let path_style = Style::new().bold();
    let filter_style = Style::new().green();

    for entry in &entries {
        println!(
            "{}  {}  {}",
            time_style.apply_to(&entry.timestamp),
            path_style.apply_to(&entry.source),
            filter_style.apply_to(entry.filters.join(", "))
        );
    }

    Ok(())
}
