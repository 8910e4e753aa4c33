//! genie-eureka binary: environment and flags in, report on stdout, logs on stderr.

use clap::Parser;
use genie_eureka::{run, BlockingEurekaClient, Cli, EurekaConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config(EurekaConfig::from_env());
    tracing::debug!(?config, "starting");
    let client = BlockingEurekaClient::new(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&client, cli.command.as_ref(), &mut out) {
        tracing::error!(error = %e, "lookup failed");
        return Err(e);
    }
    Ok(())
}
