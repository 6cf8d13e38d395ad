mod cli;

use anyhow::{Context, Result};
use calculator_logger::create_logger;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Diagnostics about the logger itself go to stderr; stdout belongs to the console transport
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = cli::Cli::parse();
    let config = cli.logger_config().context("invalid logger configuration")?;
    let logger = create_logger(&config).context("failed to build logger")?;

    logger.log(cli.severity, cli.message.clone(), cli.record_fields());
    logger.close().context("failed to flush transports")?;

    if logger.write_failures() > 0 {
        anyhow::bail!("{} record write(s) failed", logger.write_failures());
    }
    Ok(())
}
