//! genie-eureka: resolve genie (and related) service endpoints from a Eureka registry.

pub mod cli;

pub use cli::{run, Cli, Commands};
pub use eureka_core::{BlockingEurekaClient, EurekaClient, EurekaConfig, EurekaError};
