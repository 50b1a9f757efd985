//! Networking modules for the JSON request client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes the request helpers, `envelope` validates response bodies and
//! normalizes failures, and `transport` abstracts the HTTP wire. `gloo` adds
//! the in-page transport when the `hydrate` feature is on.

pub mod api;
pub mod envelope;
#[cfg(feature = "hydrate")]
pub mod gloo;
pub mod transport;
