//! System abstraction for environment, filesystem, clock and entropy
//!
//! This module provides a unified trait for all external system interactions,
//! allowing for deterministic testing with mock implementations.

use std::env::VarError;
use std::io;
use std::path::Path;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for system operations
///
/// This trait abstracts every interaction with the operating system that
/// errtype needs: reading the catalog, environment overrides, and the clock
/// and randomness that feed instance identifiers.
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std` and `rand`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    // ==================== Environment Operations ====================

    /// Get an environment variable
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    // ==================== Identity Sources ====================

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;

    /// 128 bits of randomness; only the low 80 are used for identifiers
    fn random_u128(&self) -> u128;
}
