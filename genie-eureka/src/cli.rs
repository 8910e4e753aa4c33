//! CLI: report mode (no subcommand) plus single lookups.

use std::io::Write;
use std::time::Duration;

use clap::{Parser, Subcommand};
use eureka_core::{BlockingEurekaClient, EurekaConfig, Instance, InstanceStatus, DEFAULT_APP_NAME};

/// Application whose base URL the report prints after genie's.
const EVENT_SERVICE_APP: &str = "dsees";

#[derive(Parser, Debug)]
#[command(name = "genie-eureka")]
#[command(about = "Look up genie service instances in a Eureka registry")]
pub struct Cli {
    /// Registry endpoint (e.g. http://eureka:8080/eureka/v2/apps). Wins over EUREKA_URL.
    #[arg(long, global = true)]
    pub eureka_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the base URL of one UP instance (or SERVICE_BASE_URL if set).
    BaseUrl {
        #[arg(default_value = DEFAULT_APP_NAME)]
        app: String,
    },
    /// Print instances in the given status as JSON.
    Instances {
        #[arg(default_value = DEFAULT_APP_NAME)]
        app: String,
        #[arg(long, default_value = "UP")]
        status: String,
    },
    /// Print OUT_OF_SERVICE instances as JSON.
    OutOfService {
        #[arg(default_value = DEFAULT_APP_NAME)]
        app: String,
    },
}

impl Cli {
    /// Flags layered over the environment-derived config.
    pub fn config(&self, base: EurekaConfig) -> EurekaConfig {
        let mut config = base;
        if let Some(url) = &self.eureka_url {
            config = config.eureka_url(url.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn write_instances(
    out: &mut impl Write,
    instances: &[Instance],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    writeln!(out, "{}", serde_json::to_string_pretty(instances)?)?;
    Ok(())
}

/// Execute `command` against `client`, writing the report to `out`. First error aborts.
pub fn run(
    client: &BlockingEurekaClient,
    command: Option<&Commands>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match command {
        None => {
            writeln!(out, "Getting base URL for Genie Service from Eureka:")?;
            writeln!(out, "{}", client.service_base_url(DEFAULT_APP_NAME)?)?;
            writeln!(out)?;

            writeln!(out, "Getting base URL for Event Service from Eureka:")?;
            writeln!(out, "{}", client.service_base_url(EVENT_SERVICE_APP)?)?;
            writeln!(out)?;

            writeln!(out, "Getting list of all Genie OOS instances")?;
            write_instances(out, &client.out_of_service_instances(DEFAULT_APP_NAME)?)
        }
        Some(Commands::BaseUrl { app }) => {
            writeln!(out, "{}", client.service_base_url(app)?)?;
            Ok(())
        }
        Some(Commands::Instances { app, status }) => {
            let status = InstanceStatus::from(status.as_str());
            write_instances(out, &client.instances(app, &status)?)
        }
        Some(Commands::OutOfService { app }) => {
            write_instances(out, &client.out_of_service_instances(app)?)
        }
    }
}
