//! Error handling module
//!
//! Defines the crate's own failure type and its process exit codes

pub mod types;

pub use types::*;
