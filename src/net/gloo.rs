//! Browser [`Transport`] over `fetch`, via `gloo-net`.
//!
//! DESIGN
//! ======
//! `gloo-net` futures hold JS handles and are not `Send`, while the JSON
//! client hands out `Send` futures. Each request therefore runs on the page
//! executor through `spawn_local` and reports back over a oneshot channel.
//! Relative URLs resolve against the page location, as `fetch` does.

#[cfg(test)]
#[path = "gloo_test.rs"]
mod gloo_test;

use futures::channel::oneshot;
use gloo_net::http::{Method, RequestBuilder};

use super::transport::{JsonRequest, Transport, TransportFailure, TransportResponse, decode_response};

/// [`Transport`] for code running inside a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl GlooTransport {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Transport for GlooTransport {
    async fn send(&self, request: JsonRequest) -> Result<TransportResponse, TransportFailure> {
        let (tx, rx) = oneshot::channel();
        wasm_bindgen_futures::spawn_local(async move {
            if tx.send(fetch(request).await).is_err() {
                tracing::debug!("json request dropped before completion");
            }
        });
        rx.await.unwrap_or_else(|_| Err(TransportFailure::network("request task cancelled")))
    }
}

async fn fetch(request: JsonRequest) -> Result<TransportResponse, TransportFailure> {
    let method = Method::from_bytes(request.method.as_bytes()).map_err(TransportFailure::network)?;
    let mut builder = RequestBuilder::new(&request.url).method(method);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(TransportFailure::network)?;

    let response = prepared.send().await.map_err(TransportFailure::network)?;
    let status = response.status();
    let status_text = non_blank(response.status_text());
    let text = response.text().await.map_err(TransportFailure::network)?;
    decode_response(status, status_text, &text)
}

/// HTTP/2 responses carry no reason phrase; browsers report it as `""`.
fn non_blank(status_text: String) -> Option<String> {
    (!status_text.trim().is_empty()).then_some(status_text)
}
