//! Command-line interface module
//!
//! Handles argument parsing and metadata arguments

pub mod args;

pub use args::*;
