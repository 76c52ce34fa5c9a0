// Main entry point - Configuration, wiring and file I/O
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::application::split_service::SplitService;
use crate::infrastructure::config::{SplitConfig, load_split_config};
use crate::infrastructure::dashboard_file::{load_dashboard, output_path, save_dashboard};
use crate::presentation::cli::{SplitReport, parse_args};

fn main() -> anyhow::Result<()> {
    let args = parse_args();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_split_config()?;
    let report = run(&args.dashboard, &config)?;

    println!("{}", report);
    Ok(())
}

/// Load, split and persist one dashboard. Nothing is written unless the
/// whole transform succeeds.
fn run(dashboard: &Path, config: &SplitConfig) -> anyhow::Result<SplitReport> {
    let nodes = config.nodes();
    let service = SplitService::from_config(config);

    let document = load_dashboard(dashboard)?;
    let document = service.split(document, &nodes);

    let output = output_path(dashboard, &config.output_suffix);
    save_dashboard(&output, &document)?;

    Ok(SplitReport {
        output,
        nodes,
        total_panels: document.panels.len(),
    })
}
