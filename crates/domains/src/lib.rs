//! # domains
//!
//! The central domain models, port traits, and error taxonomy for the
//! Guarda Memória backend. This crate is pure: no I/O, no web or database
//! dependencies. Adapters implement the ports; services orchestrate them.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
