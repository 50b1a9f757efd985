//! JSON request helpers enforcing the `{success, errors}` envelope.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns in two stages. The outer `Result` carries fatal
//! [`PreconditionError`]s (no transport, empty method) and is decided before
//! anything is sent. The returned [`PendingJson`] future resolves to the
//! envelope body or a normalized [`RequestError`]; nothing else escapes.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use super::envelope::{Envelope, normalize_transport_failure};
use super::transport::{ACCEPT_JSON, CONTENT_TYPE_JSON, JsonRequest, Transport};
use crate::error::{PreconditionError, RequestError};

/// In-flight JSON request.
pub type PendingJson = BoxFuture<'static, Result<Value, RequestError>>;

/// Envelope-aware JSON client.
#[derive(Clone, Default)]
pub struct JsonClient {
    transport: Option<Arc<dyn Transport>>,
}

impl JsonClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport: Some(transport) }
    }

    /// A client with no HTTP capability; every call fails fatally.
    #[must_use]
    pub fn detached() -> Self {
        Self { transport: None }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    /// `GET url`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a transport.
    pub fn get_json(&self, url: &str) -> Result<PendingJson, PreconditionError> {
        let transport = self.require_transport()?;
        Ok(dispatch(transport, JsonRequest {
            method: "GET".to_owned(),
            url: url.to_owned(),
            headers: vec![ACCEPT_JSON],
            body: None,
        }))
    }

    /// `POST url` with `data` (default `{}`, also for `null`) as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a transport.
    pub fn post_json(&self, url: &str, data: Option<&Value>) -> Result<PendingJson, PreconditionError> {
        self.send_with_body("POST", url, data)
    }

    /// `PUT url` with `data` (default `{}`, also for `null`) as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a transport.
    pub fn put_json(&self, url: &str, data: Option<&Value>) -> Result<PendingJson, PreconditionError> {
        self.send_with_body("PUT", url, data)
    }

    /// `DELETE url` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a transport.
    pub fn delete_json(&self, url: &str) -> Result<PendingJson, PreconditionError> {
        self.request_json("DELETE", url, None)
    }

    /// Arbitrary method. The method is trimmed and upper-cased; a body is sent
    /// only when `data` is present and non-null and the method is not `GET`
    /// or `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingCapability`] without a transport and
    /// [`PreconditionError::InvalidMethod`] for a blank method.
    pub fn request_json(&self, method: &str, url: &str, data: Option<&Value>) -> Result<PendingJson, PreconditionError> {
        let transport = self.require_transport()?;

        let method = method.trim().to_uppercase();
        if method.is_empty() {
            return Err(PreconditionError::InvalidMethod);
        }

        let data = data.filter(|value| !value.is_null());
        let carries_body = data.is_some() && method != "GET" && method != "HEAD";
        let mut headers = vec![ACCEPT_JSON];
        let body = if carries_body {
            headers.push(CONTENT_TYPE_JSON);
            data.map(Value::to_string)
        } else {
            None
        };

        Ok(dispatch(transport, JsonRequest { method, url: url.to_owned(), headers, body }))
    }

    fn send_with_body(&self, method: &str, url: &str, data: Option<&Value>) -> Result<PendingJson, PreconditionError> {
        let transport = self.require_transport()?;
        let body = match data {
            None | Some(Value::Null) => "{}".to_owned(),
            Some(value) => value.to_string(),
        };
        Ok(dispatch(transport, JsonRequest {
            method: method.to_owned(),
            url: url.to_owned(),
            headers: vec![ACCEPT_JSON, CONTENT_TYPE_JSON],
            body: Some(body),
        }))
    }

    fn require_transport(&self) -> Result<Arc<dyn Transport>, PreconditionError> {
        self.transport.clone().ok_or(PreconditionError::MissingCapability("http"))
    }
}

fn dispatch(transport: Arc<dyn Transport>, request: JsonRequest) -> PendingJson {
    async move {
        let method = request.method.clone();
        let url = request.url.clone();
        tracing::debug!(%method, %url, "json request");

        let result = match transport.send(request).await {
            Ok(response) => Envelope::from_body(response.body).into_result(response.status),
            Err(failure) => Err(normalize_transport_failure(&failure)),
        };

        if let Err(err) = &result {
            tracing::warn!(%method, %url, status = err.status_code, error = %err.message, "json request failed");
        }
        result
    }
    .boxed()
}
