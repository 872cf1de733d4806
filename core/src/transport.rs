//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! The transport only moves bytes. It attaches the headers it is given,
//! sends the body verbatim and hands back status, headers and body. A 4xx
//! or 5xx is a successful round trip at this layer. Connection pooling,
//! TLS and timeouts are whatever the underlying HTTP library defaults to.

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Asynchronous request executor used by `Client`.
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking request executor used by `BlockingClient`.
#[cfg(feature = "blocking")]
pub trait BlockingTransport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[cfg(feature = "async")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "async")]
impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest::Client`, e.g. one with custom timeouts.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// `BlockingTransport` backed by a `ureq::Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data rather than `Err`.
#[cfg(feature = "blocking")]
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "blocking")]
impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[cfg(feature = "blocking")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "blocking")]
impl BlockingTransport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let mut response = match method {
            HttpMethod::Get => {
                let mut req = self.agent.get(&path);
                for (name, value) in &headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()?
            }
            HttpMethod::Delete => {
                let mut req = self.agent.delete(&path);
                for (name, value) in &headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()?
            }
            HttpMethod::Post => {
                let mut req = self.agent.post(&path);
                for (name, value) in &headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => req.send(body.as_bytes())?,
                    None => req.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Invalid UTF-8 must reach `parse` and fail there as a decode error.
        let bytes = response.body_mut().read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
