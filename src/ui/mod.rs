//! UI helpers shared across page scripts.

pub mod status;

pub use status::set_status;
