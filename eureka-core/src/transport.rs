//! Registry transport: GET a URL with `Accept: application/json`, return the body bytes.
//! Async so it does not block the runtime. Tests plug in their own implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::ACCEPT;
use http_body_util::{BodyExt, Empty};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::EurekaError;

#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Non-2xx responses are errors; the body is returned only on success.
    async fn get_json(&self, url: &str) -> Result<Vec<u8>, EurekaError>;
}

/// Plain-HTTP transport on the hyper legacy client. One attempt per call, bounded by `timeout`.
pub struct HttpTransport {
    client: Client<HttpConnector, Empty<Bytes>>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout,
        }
    }
}

fn network_error(url: &str, reason: impl fmt::Display) -> EurekaError {
    EurekaError::Network {
        url: url.to_owned(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Vec<u8>, EurekaError> {
        let uri = url.parse::<Uri>().map_err(|e| network_error(url, e))?;
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| network_error(url, e))?;

        let exchange = async {
            let response = self.client.request(req).await.map_err(|e| e.to_string())?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| e.to_string())?
                .to_bytes();
            Ok::<_, String>((status, body))
        };
        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| network_error(url, format!("timed out after {:?}", self.timeout)))?
            .map_err(|e| network_error(url, e))?;

        debug!(url, status = status.as_u16(), bytes = body.len(), "registry responded");
        if !status.is_success() {
            return Err(network_error(url, format!("registry returned {}", status)));
        }
        Ok(body.to_vec())
    }
}
