//! Client configuration. The environment is read once, at the process boundary (`from_env`);
//! everything below takes an explicit `EurekaConfig`.

use std::time::Duration;

/// Registry base endpoint, e.g. `http://eureka.local:8080/eureka/v2/apps`.
pub const EUREKA_URL_ENV: &str = "EUREKA_URL";
/// Full base-URL override; bypasses the registry when resolving a service URL.
pub const SERVICE_BASE_URL_ENV: &str = "SERVICE_BASE_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EurekaConfig {
    pub eureka_url: Option<String>,
    pub service_base_url: Option<String>,
    /// Covers connect, response head and body of one registry request.
    pub timeout: Duration,
}

impl EurekaConfig {
    pub fn new() -> Self {
        Self {
            eureka_url: None,
            service_base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `EUREKA_URL` and `SERVICE_BASE_URL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, against any key -> value lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            eureka_url: lookup(EUREKA_URL_ENV).and_then(non_empty),
            service_base_url: lookup(SERVICE_BASE_URL_ENV).and_then(non_empty),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Explicit registry endpoint. An empty string leaves the current value in place.
    pub fn eureka_url(mut self, url: impl Into<String>) -> Self {
        if let Some(url) = non_empty(url.into()) {
            self.eureka_url = Some(url);
        }
        self
    }

    /// Explicit base-URL override. An empty string leaves the current value in place.
    pub fn service_base_url(mut self, url: impl Into<String>) -> Self {
        if let Some(url) = non_empty(url.into()) {
            self.service_base_url = Some(url);
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for EurekaConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
