//! Auth-aware page chrome.

pub mod header;

pub use header::{AuthHeader, AuthHeaderOptions, AuthState, LoggedOutReason};
