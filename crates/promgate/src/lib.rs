//! Top-level facade crate for promgate.
//!
//! Re-exports the metric core and the HTTP server library so users can depend on a single crate.

pub mod core {
    pub use promgate_core::*;
}

pub mod server {
    pub use promgate_server::*;
}
