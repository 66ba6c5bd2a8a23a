//! Shared configuration read when error instances are constructed
//!
//! A [`Registry`] holds the `typePrefix` joined onto every error `type` URI
//! together with the identifier generator. Applications normally use
//! [`Registry::global`]; tests build isolated registries with their own
//! [`System`].

use crate::identity::{InstanceId, InstanceIdGenerator};
use crate::system::{RealSystem, System};
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::debug;

static GLOBAL: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::new()));

/// Late-bound configuration consumed by [`crate::factory::ErrorType`]
pub struct Registry {
    type_prefix: RwLock<String>,
    ids: InstanceIdGenerator,
    system: Arc<dyn System>,
}

impl Registry {
    /// Create a registry backed by the real clock and entropy
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::with_system(Arc::new(RealSystem::new()))
    }

    /// Create a registry that reads time and randomness from `system`
    #[must_use]
    #[inline]
    pub fn with_system(system: Arc<dyn System>) -> Self {
        Self {
            type_prefix: RwLock::new(String::new()),
            ids: InstanceIdGenerator::new(),
            system,
        }
    }

    /// The process-wide registry
    #[must_use]
    #[inline]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Set the prefix at build time (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_type_prefix<S: Into<String>>(self, prefix: S) -> Self {
        self.set_type_prefix(prefix);
        self
    }

    /// Current type prefix
    #[must_use]
    pub fn type_prefix(&self) -> String {
        self.type_prefix
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the type prefix
    ///
    /// Only instances constructed afterwards see the new value.
    pub fn set_type_prefix<S: Into<String>>(&self, prefix: S) {
        let prefix = prefix.into();
        debug!("Setting error type prefix to '{}'", prefix);
        *self
            .type_prefix
            .write()
            .unwrap_or_else(PoisonError::into_inner) = prefix;
    }

    /// Draw the next instance identifier
    #[must_use]
    #[inline]
    pub fn next_instance_id(&self) -> InstanceId {
        self.ids.next_id(self.system.as_ref())
    }
}

impl Default for Registry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("type_prefix", &self.type_prefix())
            .finish_non_exhaustive()
    }
}
