//! Page-side plumbing: an envelope-aware JSON client, a named-route resolver
//! with `data-route` auto-wiring, a status display, and a login/logout
//! header toggler.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything a page helper touches is injected: the document through
//! [`dom::Dom`], the wire through [`net::transport::Transport`], and the
//! route table through [`config::PageConfig`]. [`page::Page`] bundles them
//! and exposes the `http`, `ui`, `routing`, and `auth` groups.

pub mod auth;
pub mod config;
pub mod dom;
pub mod error;
pub mod net;
pub mod page;
pub mod routing;
pub mod ui;
pub mod value;

#[cfg(test)]
mod test_helpers;

pub use error::{ConfigError, Error, PreconditionError, RequestError};
pub use page::{Page, PageBuilder};
