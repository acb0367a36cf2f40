//! Top-level facade crate for metricbox.
//!
//! Re-exports the protocol core and the server library so users can depend on a single crate.

pub mod core {
    pub use metricbox_core::*;
}

pub mod server {
    pub use metricbox_server::*;
}
