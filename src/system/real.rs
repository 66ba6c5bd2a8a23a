//! Real system implementation using `std` and `rand`

use super::System;
use std::env::VarError;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Production implementation of System trait
///
/// This implementation directly delegates to the standard library and the
/// thread-local `rand` generator.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn now_millis(&self) -> u64 {
        // A clock before 1970 collapses to zero; ids stay monotonic regardless.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    fn random_u128(&self) -> u128 {
        rand::random::<u128>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(RealSystem::new().now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn randomness_varies() {
        let system = RealSystem::new();
        assert_ne!(system.random_u128(), system.random_u128());
    }
}
