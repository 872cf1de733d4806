//! Stateless HTTP request builder and response parser for the Suburb API.
//!
//! # Design
//! `SuburbClient` holds only an immutable `ClientConfig` and carries no
//! mutable state between calls. Each remote operation has a `build_*`
//! method producing an `HttpRequest`; a single `parse` decodes any
//! `HttpResponse`. Whoever sits between the two performs the I/O, which
//! keeps this layer deterministic and free of network dependencies.
//!
//! Path segments are interpolated as given. Namespaces or names containing
//! reserved URL characters are not percent-encoded, so callers must
//! pre-encode them if the service expects it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AddLog, CreateQueue, PushMessage, SetFlag};

/// Synchronous, stateless request builder for the Suburb API.
#[derive(Debug, Clone)]
pub struct SuburbClient {
    config: ClientConfig,
}

impl SuburbClient {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(host, api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // --- queues ---

    pub fn build_list_queues(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/queues".to_string(), None)
    }

    pub fn build_create_queue(&self, namespace: &str, queue: &str) -> Result<HttpRequest, ApiError> {
        let body = encode(&CreateQueue { namespace, queue })?;
        Ok(self.request(HttpMethod::Post, "/queues".to_string(), Some(body)))
    }

    pub fn build_push_to_queue<M>(&self, ns: &str, name: &str, message: &M) -> Result<HttpRequest, ApiError>
    where
        M: Serialize + ?Sized,
    {
        let body = encode(&PushMessage { message })?;
        Ok(self.request(HttpMethod::Post, format!("/queues/{ns}/{name}"), Some(body)))
    }

    pub fn build_delete_queue(&self, ns: &str, name: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/queues/{ns}/{name}"), None)
    }

    pub fn build_peek_queue(&self, ns: &str, name: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/queues/{ns}/{name}/peek"), None)
    }

    /// Pop is a bodyless POST.
    pub fn build_pop_queue(&self, ns: &str, name: &str) -> HttpRequest {
        self.request(HttpMethod::Post, format!("/queues/{ns}/{name}/pop"), None)
    }

    pub fn build_get_queue_length(&self, ns: &str, name: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/queues/{ns}/{name}/length"), None)
    }

    // --- flags ---

    pub fn build_list_flags(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/flags".to_string(), None)
    }

    pub fn build_get_flag(&self, ns: &str, name: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/flags/{ns}/{name}"), None)
    }

    pub fn build_set_flag<V>(&self, ns: &str, name: &str, value: &V) -> Result<HttpRequest, ApiError>
    where
        V: Serialize + ?Sized,
    {
        let body = encode(&SetFlag { value })?;
        Ok(self.request(HttpMethod::Post, format!("/flags/{ns}/{name}"), Some(body)))
    }

    pub fn build_delete_flag(&self, ns: &str, name: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/flags/{ns}/{name}"), None)
    }

    // --- logs ---

    pub fn build_list_logs(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/logs".to_string(), None)
    }

    pub fn build_add_log(
        &self,
        ns: &str,
        source: &str,
        level: &str,
        message: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(&AddLog {
            source,
            level,
            message,
        })?;
        Ok(self.request(HttpMethod::Post, format!("/logs/{ns}"), Some(body)))
    }

    /// Decode the response body into `T`, whatever the status code.
    ///
    /// A JSON error payload on a 4xx/5xx decodes like any other body. An
    /// empty or non-JSON body yields `ApiError::Decode`.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        serde_json::from_str(&response.body).map_err(ApiError::Decode)
    }

    fn request(&self, method: HttpMethod, route: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{route}", self.config.host()),
            headers: self.config.headers().to_vec(),
            body,
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(ApiError::Serialization)
}
