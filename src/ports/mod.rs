//! Port traits decoupling domain logic from I/O.

pub mod config_port;
pub mod upstream_port;
