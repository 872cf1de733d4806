//! Request bodies and the optional response envelope.
//!
//! # Design
//! Bodies borrow their fields so building a request never clones caller
//! data. Each struct serializes to exactly its declared keys; the remote
//! service owns any validation.

use serde::{Deserialize, Serialize};

/// Body of `POST /queues`.
#[derive(Debug, Serialize)]
pub struct CreateQueue<'a> {
    pub namespace: &'a str,
    pub queue: &'a str,
}

/// Body of `POST /queues/{ns}/{name}`.
#[derive(Debug, Serialize)]
pub struct PushMessage<'a, M: ?Sized> {
    pub message: &'a M,
}

/// Body of `POST /flags/{ns}/{name}`.
#[derive(Debug, Serialize)]
pub struct SetFlag<'a, V: ?Sized> {
    pub value: &'a V,
}

/// Body of `POST /logs/{ns}`.
#[derive(Debug, Serialize)]
pub struct AddLog<'a> {
    pub source: &'a str,
    pub level: &'a str,
    pub message: &'a str,
}

/// A result wrapped under a `response` key.
///
/// The service conventionally answers `{"response": ...}`. Callers who rely
/// on that can decode into `Envelope<T>` through `Client::send`; the
/// operation methods themselves return the raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}
