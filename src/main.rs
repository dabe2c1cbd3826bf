// Entry point: load the incident table, print every analysis section and
// export the per-site summary.
//
// The run is strictly one way: raw rows -> coerced records -> aggregate
// views -> console text and `incidents_by_site.csv`. Any I/O failure
// aborts the run with a diagnostic and exit status 1.
mod config;
mod console;
mod error;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use config::ReportConfig;
use error::{ReportError, Result};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use types::SiteSummaryRow;

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG`
/// overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(config: &ReportConfig) -> Result<()> {
    let (records, load_report) = loader::load_incidents(&config.input_path)?;
    info!(
        incidents = records.len(),
        skipped = load_report.skipped_rows,
        "loaded {}",
        config.input_path.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let console_err = |source: io::Error| ReportError::Write {
        path: "<stdout>".into(),
        source,
    };

    console::write_load_note(&mut out, &load_report, records.len()).map_err(console_err)?;
    console::write_report(&mut out, &records, config).map_err(console_err)?;

    let rows: Vec<SiteSummaryRow> = reports::site_summary(&records)
        .iter()
        .map(|s| s.to_row())
        .collect();
    output::write_csv(&config.output_path, &SiteSummaryRow::HEADER, &rows)?;
    info!(sites = rows.len(), "wrote {}", config.output_path.display());

    output::preview_table_rows(&mut out, &rows, config.preview_rows).map_err(console_err)?;
    console::write_export_note(&mut out, &config.output_path.display().to_string())
        .map_err(console_err)?;
    out.flush().map_err(console_err)
}

fn main() {
    init_logging();
    let config = ReportConfig::default();
    if let Err(e) = run(&config) {
        error!("report failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
