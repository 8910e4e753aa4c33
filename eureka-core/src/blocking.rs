//! Blocking facade for callers without a runtime (test scripts, the CLI).
//! Must not be called from inside another tokio runtime.

use tokio::runtime::{Builder, Runtime};

use crate::client::EurekaClient;
use crate::config::EurekaConfig;
use crate::instance::{Instance, InstanceStatus};
use crate::transport::RegistryTransport;
use crate::EurekaError;

pub struct BlockingEurekaClient {
    inner: EurekaClient,
    runtime: Runtime,
}

impl BlockingEurekaClient {
    pub fn new(config: EurekaConfig) -> Result<Self, EurekaError> {
        Self::from_client(EurekaClient::new(config))
    }

    pub fn with_transport(
        config: EurekaConfig,
        transport: Box<dyn RegistryTransport>,
    ) -> Result<Self, EurekaError> {
        Self::from_client(EurekaClient::with_transport(config, transport))
    }

    pub fn from_client(inner: EurekaClient) -> Result<Self, EurekaError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    pub fn client(&self) -> &EurekaClient {
        &self.inner
    }

    pub fn instances(
        &self,
        app_name: &str,
        status: &InstanceStatus,
    ) -> Result<Vec<Instance>, EurekaError> {
        self.runtime.block_on(self.inner.instances(app_name, status))
    }

    pub fn service_base_url(&self, app_name: &str) -> Result<String, EurekaError> {
        self.runtime.block_on(self.inner.service_base_url(app_name))
    }

    pub fn out_of_service_instances(&self, app_name: &str) -> Result<Vec<Instance>, EurekaError> {
        self.runtime.block_on(self.inner.out_of_service_instances(app_name))
    }
}
