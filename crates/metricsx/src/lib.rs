//! Top-level facade crate for metricsx.
//!
//! Re-exports the core registry/renderers and the HTTP server library so users can depend on a single crate.

pub mod core {
    pub use metricsx_core::*;
}

pub mod server {
    pub use metricsx_server::*;
}
