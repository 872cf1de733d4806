//! Connection configuration for the Suburb client.
//!
//! The header list is computed once here and shared by every request the
//! client builds afterwards. Nothing in this module mutates after `new`.

use std::fmt;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Host and credential for one remote service.
///
/// Both values are stored verbatim. A malformed host or empty key is not
/// rejected here; the first request surfaces the failure.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    api_key: String,
    headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        let host = host.into();
        let api_key = api_key.into();
        let headers = vec![
            (AUTHORIZATION.to_string(), api_key.clone()),
            (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
        ];
        Self {
            host,
            api_key,
            headers,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Headers attached to every request, in send order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
