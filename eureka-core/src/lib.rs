//! Eureka core: registry lookup, instance model, HTTP transport.

pub mod blocking;
pub mod client;
pub mod config;
pub mod instance;
pub mod transport;

pub use blocking::BlockingEurekaClient;
pub use client::{pick_instance, EurekaClient, DEFAULT_APP_NAME};
pub use config::{EurekaConfig, DEFAULT_TIMEOUT, EUREKA_URL_ENV, SERVICE_BASE_URL_ENV};
pub use instance::{filter_by_status, Instance, InstancePayload, InstanceStatus, Port, RegistryResponse};
pub use transport::{HttpTransport, RegistryTransport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EurekaError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("GET {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("invalid registry response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no {app_name} instances found that were {status} on {eureka_url}")]
    NotFound {
        app_name: String,
        status: InstanceStatus,
        eureka_url: String,
    },
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
