mod cli;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pollwatch_core::{Monitor, MonitorConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing();

    // Every failure is fatal; map it to an exit code
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Diagnostics go to stderr so stdout carries only cycle reports.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = MonitorConfig::from_host_port(&cli.address.to_string())?;
    tracing::debug!(url = %config.base_url, plugin = %config.plugin_name, "starting monitor");

    let mut monitor = Monitor::connect(config).await?;
    let color = output::should_color();

    monitor
        .run(|report| output::print_report(report, color).map_err(CliError::from))
        .await
}
