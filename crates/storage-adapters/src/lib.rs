//! # storage-adapters
//!
//! Implementations of the `domains` port traits. Each backend lives behind
//! its own feature so the binary compiles only the storage it ships with.

#[cfg(feature = "db-postgres")]
pub mod postgres;
