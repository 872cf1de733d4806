//! Blocking counterpart of `Client`, for callers without an async runtime.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::SuburbClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{BlockingTransport, UreqTransport};

#[derive(Debug, Clone)]
pub struct BlockingClient<T: BlockingTransport = UreqTransport> {
    inner: SuburbClient,
    transport: T,
}

impl BlockingClient<UreqTransport> {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_transport(ClientConfig::new(host, api_key), UreqTransport::new())
    }
}

impl<T: BlockingTransport> BlockingClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            inner: SuburbClient::from_config(config),
            transport,
        }
    }

    pub fn requests(&self) -> &SuburbClient {
        &self.inner
    }

    pub fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).map_err(ApiError::Transport)?;
        debug!(status = response.status, "received response");
        self.inner.parse(response)
    }

    pub fn list_queues(&self) -> Result<Value, ApiError> {
        self.send(self.inner.build_list_queues())
    }

    pub fn create_queue(&self, namespace: &str, queue: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_create_queue(namespace, queue)?)
    }

    pub fn push_to_queue<M>(&self, ns: &str, name: &str, message: &M) -> Result<Value, ApiError>
    where
        M: Serialize + ?Sized,
    {
        self.send(self.inner.build_push_to_queue(ns, name, message)?)
    }

    pub fn delete_queue(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_delete_queue(ns, name))
    }

    pub fn peek_queue(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_peek_queue(ns, name))
    }

    pub fn pop_queue(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_pop_queue(ns, name))
    }

    pub fn get_queue_length(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_get_queue_length(ns, name))
    }

    pub fn list_flags(&self) -> Result<Value, ApiError> {
        self.send(self.inner.build_list_flags())
    }

    pub fn get_flag(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_get_flag(ns, name))
    }

    pub fn set_flag<V>(&self, ns: &str, name: &str, value: &V) -> Result<Value, ApiError>
    where
        V: Serialize + ?Sized,
    {
        self.send(self.inner.build_set_flag(ns, name, value)?)
    }

    pub fn delete_flag(&self, ns: &str, name: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_delete_flag(ns, name))
    }

    pub fn list_logs(&self) -> Result<Value, ApiError> {
        self.send(self.inner.build_list_logs())
    }

    pub fn add_log(&self, ns: &str, source: &str, level: &str, message: &str) -> Result<Value, ApiError> {
        self.send(self.inner.build_add_log(ns, source, level, message)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpResponse};

    /// Records requests and replays a queue of canned outcomes.
    struct Scripted {
        seen: Mutex<Vec<HttpRequest>>,
        outcomes: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    }

    impl Scripted {
        fn new(mut outcomes: Vec<Result<HttpResponse, TransportError>>) -> Self {
            outcomes.reverse();
            Self {
                seen: Mutex::new(Vec::new()),
                outcomes: Mutex::new(outcomes),
            }
        }
    }

    impl BlockingTransport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.outcomes.lock().unwrap().pop().expect("no scripted outcome left")
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn pop_queue_issues_one_bodyless_post() {
        let client = BlockingClient::with_transport(
            ClientConfig::new("http://h", "k"),
            Scripted::new(vec![ok(200, r#"{"response":"m1"}"#)]),
        );

        let value = client.pop_queue("orders", "main").unwrap();
        assert_eq!(value, json!({"response": "m1"}));

        let seen = client.transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].path, "http://h/queues/orders/main/pop");
        assert!(seen[0].body.is_none());
    }

    #[test]
    fn transport_failure_leaves_client_usable() {
        let refused: TransportError = Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        let client = BlockingClient::with_transport(
            ClientConfig::new("http://h", "k"),
            Scripted::new(vec![Err(refused), ok(200, "[]")]),
        );

        let err = client.list_flags().unwrap_err();
        match err {
            ApiError::Transport(inner) => {
                let io_err = inner.downcast_ref::<io::Error>().unwrap();
                assert_eq!(io_err.kind(), io::ErrorKind::ConnectionRefused);
            }
            other => panic!("expected transport error, got {other:?}"),
        }

        assert_eq!(client.list_flags().unwrap(), json!([]));
    }
}
