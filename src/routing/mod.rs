//! Named-route resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! `table` holds the injected route definitions, `params` the ordered
//! parameter map, `generate` the token substitution, and `wiring` the
//! `data-route` auto-binding pass over a document.

pub mod generate;
pub mod params;
pub mod table;
pub mod wiring;

pub use generate::{encode_uri_component, generate_path};
pub use params::RouteParameters;
pub use table::{RouteDefinition, RouteTable};
pub use wiring::{WiringReport, resolve_data_routes};
