//! HTTP capability behind the JSON client.
//!
//! DESIGN
//! ======
//! [`Transport`] is the seam between envelope handling and the actual wire.
//! `ReqwestTransport` serves native callers and `GlooTransport` (feature
//! `hydrate`) serves pages; tests plug in scripted transports. Both feed the
//! received status and text through [`decode_response`]. A transport reports either a decoded 2xx body or a
//! [`TransportFailure`] shaped like a failed XHR: numeric status (0 when no
//! response arrived), status text, and the parsed error body if any.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use reqwest::{Method, Url};
use serde_json::Value;

#[cfg(not(target_arch = "wasm32"))]
use crate::error::ConfigError;

pub const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");
pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

/// Status text reported when no HTTP response was received.
pub const NETWORK_ERROR_TEXT: &str = "error";
/// Status text reported when a 2xx body is not valid JSON.
pub const PARSE_ERROR_TEXT: &str = "parsererror";

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// A fully prepared JSON request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRequest {
    /// Upper-cased HTTP method.
    pub method: String,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    /// Serialized JSON body, when the method carries one.
    pub body: Option<String>,
}

impl JsonRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// A 2xx response with its decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

/// A request that did not produce a usable 2xx body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportFailure {
    pub status: u16,
    pub status_text: Option<String>,
    pub response_json: Option<Value>,
}

impl TransportFailure {
    #[must_use]
    pub fn network(reason: impl std::fmt::Display) -> Self {
        tracing::debug!(%reason, "transport network failure");
        Self { status: 0, status_text: Some(NETWORK_ERROR_TEXT.to_owned()), response_json: None }
    }
}

/// Sends prepared JSON requests.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] for network errors, non-2xx statuses,
    /// and undecodable bodies.
    async fn send(&self, request: JsonRequest) -> Result<TransportResponse, TransportFailure>;
}

/// Classify a received response: non-2xx statuses fail with the parsed error
/// body, empty 2xx bodies decode to `null`, and other 2xx bodies must be JSON.
///
/// # Errors
///
/// Returns a [`TransportFailure`] for non-2xx statuses and non-JSON bodies.
pub fn decode_response(
    status: u16,
    status_text: Option<String>,
    text: &str,
) -> Result<TransportResponse, TransportFailure> {
    if !(200..300).contains(&status) {
        let response_json = match serde_json::from_str::<Value>(text) {
            Ok(json) => Some(json),
            Err(_) => None,
        };
        return Err(TransportFailure { status, status_text, response_json });
    }

    if text.trim().is_empty() {
        return Ok(TransportResponse { status, body: Value::Null });
    }

    match serde_json::from_str(text) {
        Ok(body) => Ok(TransportResponse { status, body }),
        Err(e) => {
            tracing::debug!(error = %e, status, "response body is not JSON");
            Err(TransportFailure { status, status_text: Some(PARSE_ERROR_TEXT.to_owned()), response_json: None })
        }
    }
}

// =============================================================================
// REQWEST
// =============================================================================

/// [`Transport`] over a shared `reqwest::Client`.
#[cfg(not(target_arch = "wasm32"))]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: Option<Url>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    /// Build a transport. Relative request URLs are joined onto `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not absolute or the client fails to build.
    pub fn new(base_url: Option<&str>, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            Some(raw) => Some(Url::parse(raw).map_err(|e| ConfigError::BaseUrl {
                url: raw.to_owned(),
                reason: e.to_string(),
            })?),
            None => None,
        };
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    fn resolve(&self, url: &str) -> Result<Url, TransportFailure> {
        let resolved = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        resolved.map_err(TransportFailure::network)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: JsonRequest) -> Result<TransportResponse, TransportFailure> {
        let url = self.resolve(&request.url)?;
        let method = Method::from_bytes(request.method.as_bytes()).map_err(TransportFailure::network)?;

        let mut builder = self.http.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, *value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportFailure::network)?;
        let status = response.status();
        let text = response.text().await.map_err(TransportFailure::network)?;
        decode_response(status.as_u16(), status.canonical_reason().map(str::to_owned), &text)
    }
}
