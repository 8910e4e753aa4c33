//! Registry lookup client: GET `<eureka_url>/<app_name>`, keep instances in the requested
//! status, optionally pick one at random. Every error goes straight back to the caller.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{EurekaConfig, EUREKA_URL_ENV, SERVICE_BASE_URL_ENV};
use crate::instance::{filter_by_status, Instance, InstanceStatus, RegistryResponse};
use crate::transport::{HttpTransport, RegistryTransport};
use crate::EurekaError;

/// Application looked up when the caller does not name one.
pub const DEFAULT_APP_NAME: &str = "genie";

pub struct EurekaClient {
    config: EurekaConfig,
    transport: Box<dyn RegistryTransport>,
}

impl EurekaClient {
    /// Client over plain HTTP, with the request timeout taken from `config`.
    pub fn new(config: EurekaConfig) -> Self {
        let transport = HttpTransport::new(config.timeout);
        Self::with_transport(config, Box::new(transport))
    }

    /// Read the environment once; a non-empty `eureka_url` wins over `EUREKA_URL`.
    pub fn from_env(eureka_url: Option<&str>) -> Self {
        let mut config = EurekaConfig::from_env();
        if let Some(url) = eureka_url {
            config = config.eureka_url(url);
        }
        Self::new(config)
    }

    pub fn with_transport(config: EurekaConfig, transport: Box<dyn RegistryTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &EurekaConfig {
        &self.config
    }

    pub fn eureka_url(&self) -> Option<&str> {
        self.config.eureka_url.as_deref()
    }

    /// Instances of `app_name` currently in `status`, in registry order. Never empty on success.
    pub async fn instances(
        &self,
        app_name: &str,
        status: &InstanceStatus,
    ) -> Result<Vec<Instance>, EurekaError> {
        let eureka_url = self.eureka_url().ok_or_else(|| {
            EurekaError::Configuration(format!(
                "{} is not provided via env or constructor",
                EUREKA_URL_ENV
            ))
        })?;
        if app_name.is_empty() {
            return Err(EurekaError::Configuration(
                "application name must not be empty".into(),
            ));
        }

        let url = format!("{}/{}", eureka_url, app_name);
        debug!(%url, %status, "querying registry");
        let body = self.transport.get_json(&url).await?;
        let records = RegistryResponse::from_slice(&body)?.into_records();
        let total = records.len();
        let matching = filter_by_status(records, status)?;

        if matching.is_empty() {
            warn!(app_name, %status, total, "no matching instances");
            return Err(self.not_found(app_name, status));
        }
        debug!(app_name, %status, matching = matching.len(), total, "registry lookup done");
        Ok(matching)
    }

    /// `SERVICE_BASE_URL` if configured (no registry call), else a random UP instance's
    /// `http://host:port`.
    pub async fn service_base_url(&self, app_name: &str) -> Result<String, EurekaError> {
        if let Some(url) = self.config.service_base_url.as_deref() {
            info!(service_url = url, "returning {} override", SERVICE_BASE_URL_ENV);
            return Ok(url.to_owned());
        }

        info!(app_name, "getting UP instance from registry");
        let up = self.instances(app_name, &InstanceStatus::Up).await?;
        // `instances` never returns an empty vec.
        let instance = pick_instance(&up, &mut rand::thread_rng())
            .ok_or_else(|| self.not_found(app_name, &InstanceStatus::Up))?;
        Ok(instance.base_url())
    }

    fn not_found(&self, app_name: &str, status: &InstanceStatus) -> EurekaError {
        EurekaError::NotFound {
            app_name: app_name.to_owned(),
            status: status.clone(),
            eureka_url: self.eureka_url().unwrap_or_default().to_owned(),
        }
    }

    pub async fn out_of_service_instances(
        &self,
        app_name: &str,
    ) -> Result<Vec<Instance>, EurekaError> {
        self.instances(app_name, &InstanceStatus::OutOfService).await
    }
}

/// Uniform pick over `instances`; `None` only when the slice is empty.
pub fn pick_instance<'a, R: Rng + ?Sized>(
    instances: &'a [Instance],
    rng: &mut R,
) -> Option<&'a Instance> {
    instances.choose(rng)
}
