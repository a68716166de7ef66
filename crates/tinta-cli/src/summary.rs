use console::Style;
use tinta_core::pipeline::config::PipelineConfig;
use tinta_core::pipeline::{RunStatus, RunSummary};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
    good: Style,
    bad: Style,
    warn: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
            good: Style::new().green().bold(),
            bad: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
        }
    }
}

pub fn print_run_header(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Tinta Pipeline"));
    println!();
    println!(
        "  {:<12}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    if let Some(ref output) = config.output {
        println!(
            "  {:<12}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(output.display())
        );
    }
    if config.filters.is_empty() {
        println!("  {:<12}{}", s.label.apply_to("Filters"), "none");
    } else {
        let chain = config
            .filters
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        println!(
            "  {:<12}{}",
            s.label.apply_to("Filters"),
            s.value.apply_to(chain)
        );
    }
    println!(
        "  {:<12}{}",
        s.label.apply_to("Workers"),
        s.value.apply_to(config.workers.parallelism)
    );
    println!();
}

pub fn print_run_summary(summary: &RunSummary) {
    let s = Styles::new();
    let state = &summary.state;

    println!();
    match summary.status {
        RunStatus::Succeeded if state.failed == 0 => {
            println!("  {}", s.good.apply_to("Succeeded"));
        }
        RunStatus::Succeeded => {
            // Partial success is still success, but the gaps are called out.
            println!(
                "  {} ({} frame(s) failed and were skipped)",
                s.warn.apply_to("Succeeded with gaps"),
                state.failed
            );
        }
        RunStatus::Cancelled => {
            println!("  {}", s.bad.apply_to("Cancelled"));
        }
    }

    println!(
        "  {:<12}{} of {}",
        s.label.apply_to("Written"),
        s.value.apply_to(summary.frames_written),
        s.value.apply_to(state.total)
    );
    if state.failed > 0 {
        println!("  {:<12}{}", s.label.apply_to("Failed"), state.failed);
    }
    if state.cancelled > 0 {
        println!("  {:<12}{}", s.label.apply_to("Cancelled"), state.cancelled);
    }
    if let Some(ref output) = summary.output {
        println!(
            "  {:<12}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(output.display())
        );
    }
    println!();
}
