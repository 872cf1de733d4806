//! Client library for the Suburb queue, flag and log service.
//!
//! # Overview
//! Translates typed method calls into authenticated HTTP+JSON requests and
//! returns the decoded response body as-is. The remote service owns all
//! queue, flag and log semantics; this crate owns only the host and API key.
//!
//! # Design
//! - `SuburbClient` is the sans-IO core: `build_*` produces an
//!   `HttpRequest`, `parse` consumes an `HttpResponse`.
//! - `Client` (feature `async`, on by default) drives the core through a
//!   `Transport`, reqwest by default. `BlockingClient` (feature `blocking`)
//!   does the same over ureq.
//! - Responses are never interpreted by status code. A JSON error body on a
//!   404 is an `Ok` value; only encoding, decoding and transport failures
//!   are `ApiError`s.
//! - Path segments are not percent-encoded.

#[cfg(feature = "async")]
pub mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(feature = "async")]
pub use api::{Client, Namespace};
#[cfg(feature = "blocking")]
pub use blocking::BlockingClient;
pub use client::SuburbClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
#[cfg(feature = "blocking")]
pub use transport::{BlockingTransport, UreqTransport};
#[cfg(feature = "async")]
pub use transport::{ReqwestTransport, Transport};
pub use types::Envelope;
