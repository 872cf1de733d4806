//! Asynchronous client: one method per remote operation.
//!
//! Every method is a single round trip through `Client::send`: build the
//! request, hand it to the transport, decode the body. Methods return the
//! decoded JSON untouched. `send` is public so callers with a declared
//! response shape (such as `Envelope<T>`) can decode into it directly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::SuburbClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{ReqwestTransport, Transport};

/// Async client for queues, flags and logs.
///
/// Cloning is cheap with the default transport and clones share its
/// connection pool. Concurrent calls share no mutable state and have no
/// ordering relative to each other.
#[derive(Debug, Clone)]
pub struct Client<T: Transport = ReqwestTransport> {
    inner: SuburbClient,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// No I/O and no validation happens here.
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_transport(ClientConfig::new(host, api_key), ReqwestTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            inner: SuburbClient::from_config(config),
            transport,
        }
    }

    /// The underlying request builder.
    pub fn requests(&self) -> &SuburbClient {
        &self.inner
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// Scope subsequent calls to one namespace.
    pub fn namespace<'a>(&'a self, ns: &'a str) -> Namespace<'a, T> {
        Namespace { client: self, ns }
    }

    /// Execute a built request and decode its body as `R`.
    pub async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;
        debug!(status = response.status, "received response");
        self.inner.parse(response)
    }

    pub async fn list_queues(&self) -> Result<Value, ApiError> {
        self.send(self.inner.build_list_queues()).await
    }

    pub async fn create_queue(&self, namespace: &str, queue: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_create_queue(namespace, queue)?).await
    }

    pub async fn push_to_queue<M>(&self, ns: &str, name: &str, message: &M) -> Result<Value, ApiError>
    where
        M: Serialize + ?Sized,
    {
        self.send(self.inner.build_push_to_queue(ns, name, message)?).await
    }

    pub async fn delete_queue(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_delete_queue(ns, name)).await
    }

    pub async fn peek_queue(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_peek_queue(ns, name)).await
    }

    pub async fn pop_queue(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_pop_queue(ns, name)).await
    }

    pub async fn get_queue_length(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_get_queue_length(ns, name)).await
    }

    pub async fn list_flags(&self) -> Result<Value, ApiError> {
        self.send(self.inner.build_list_flags()).await
    }

    pub async fn get_flag(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_get_flag(ns, name)).await
    }

    pub async fn set_flag<V>(&self, ns: &str, name: &str, value: &V) -> Result<Value, ApiError>
    where
        V: Serialize + ?Sized,
    {
        self.send(self.inner.build_set_flag(ns, name, value)?).await
    }

    pub async fn delete_flag(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_delete_flag(ns, name)).await
    }

    pub async fn list_logs(&self) -> Result<Value, ApiError> {
        self.send(self.inner.build_list_logs()).await
    }

    pub async fn add_log(
        &self,
        ns: &str,
        source: &str,
        level: &str,
        message: &str,
    ) -> Result<Value, ApiError> {
        self.send(self.inner.build_add_log(ns, source, level, message)?)
            .await
    }
}

/// A `Client` bound to one namespace.
///
/// Pure convenience: every method forwards to the matching `Client` method
/// with the namespace filled in.
#[derive(Debug)]
pub struct Namespace<'a, T: Transport = ReqwestTransport> {
    client: &'a Client<T>,
    ns: &'a str,
}

impl<T: Transport> Clone for Namespace<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Transport> Copy for Namespace<'_, T> {}

impl<'a, T: Transport> Namespace<'a, T> {
    pub fn name(&self) -> &'a str {
        self.ns
    }

    pub async fn create_queue(&self, queue: &str) -> Result<Value, ApiError> {
        self.client.create_queue(self.ns, queue).await
    }

    pub async fn push<M>(&self, queue: &str, message: &M) -> Result<Value, ApiError>
    where
        M: Serialize + ?Sized,
    {
        self.client.push_to_queue(self.ns, queue, message).await
    }

    pub async fn pop(&self, queue: &str) -> Result<Value, ApiError> {
        self.client.pop_queue(self.ns, queue).await
    }

    pub async fn peek(&self, queue: &str) -> Result<Value, ApiError> {
        self.client.peek_queue(self.ns, queue).await
    }

    pub async fn queue_length(&self, queue: &str) -> Result<Value, ApiError> {
        self.client.get_queue_length(self.ns, queue).await
    }

    pub async fn delete_queue(&self, queue: &str) -> Result<Value, ApiError> {
        self.client.delete_queue(self.ns, queue).await
    }

    pub async fn get_flag(&self, name: &str) -> Result<Value, ApiError> {
        self.client.get_flag(self.ns, name).await
    }

    pub async fn set_flag<V>(&self, name: &str, value: &V) -> Result<Value, ApiError>
    where
        V: Serialize + ?Sized,
    {
        self.client.set_flag(self.ns, name, value).await
    }

    pub async fn delete_flag(&self, name: &str) -> Result<Value, ApiError> {
        self.client.delete_flag(self.ns, name).await
    }

    pub async fn add_log(&self, source: &str, level: &str, message: &str) -> Result<Value, ApiError> {
        self.client.add_log(self.ns, source, level, message).await
    }
}
