//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::net::transport::{JsonRequest, Transport, TransportFailure, TransportResponse};
use crate::routing::{RouteDefinition, RouteTable};

/// Transport that answers every request with one canned reply and records what it was sent.
pub struct ScriptedTransport {
    reply: Result<TransportResponse, TransportFailure>,
    seen: Mutex<Vec<JsonRequest>>,
}

impl ScriptedTransport {
    pub fn ok(body: Value) -> Arc<Self> {
        Arc::new(Self { reply: Ok(TransportResponse { status: 200, body }), seen: Mutex::new(Vec::new()) })
    }

    pub fn failing(status: u16, status_text: &str, response_json: Option<Value>) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(TransportFailure { status, status_text: Some(status_text.to_owned()), response_json }),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<JsonRequest> {
        self.seen.lock().expect("mock mutex should lock").clone()
    }

    pub fn last(&self) -> JsonRequest {
        self.requests().pop().expect("a request was sent")
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: JsonRequest) -> Result<TransportResponse, TransportFailure> {
        self.seen.lock().expect("mock mutex should lock").push(request);
        self.reply.clone()
    }
}

/// Route table with the auth routes and a few item routes.
pub fn sample_routes() -> RouteTable {
    RouteTable::new(vec![
        RouteDefinition::new("home", "/"),
        RouteDefinition::new("example.routes", "/api/routes"),
        RouteDefinition::new("example.logout", "/logout/now"),
        RouteDefinition::new("item.show", "/items/:id"),
    ])
}
