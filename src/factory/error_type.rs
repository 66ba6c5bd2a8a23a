//! Turning definitions into constructible error types

use super::definition::ErrorTypeDefinition;
use super::instance::ErrorInstance;
use super::metadata::Metadata;
use super::stack::CapturedStack;
use crate::error::ErrtypeError;
use crate::registry::Registry;
use std::sync::Arc;
use tracing::{debug, trace};

/// Produces [`ErrorType`]s bound to one [`Registry`]
#[derive(Debug, Clone)]
pub struct ErrorFactory {
    registry: Arc<Registry>,
}

impl ErrorFactory {
    /// Create a factory reading its prefix and ids from `registry`
    #[must_use]
    #[inline]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Factory bound to [`Registry::global`]
    #[must_use]
    #[inline]
    pub fn global() -> Self {
        Self::new(Registry::global())
    }

    #[must_use]
    #[inline]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Define a new error type
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The definition has an empty `name` or `code`
    pub fn define(&self, definition: ErrorTypeDefinition) -> Result<ErrorType, ErrtypeError> {
        let definition = definition.normalize()?;
        debug!(
            "Defined error type {} ({})",
            definition.name,
            definition.key()
        );
        Ok(ErrorType {
            definition: Arc::new(definition),
            registry: Arc::clone(&self.registry),
        })
    }
}

/// Define an error type against the process-wide registry
///
/// # Errors
///
/// Returns an error if:
/// - The definition has an empty `name` or `code`
#[inline]
pub fn define(definition: ErrorTypeDefinition) -> Result<ErrorType, ErrtypeError> {
    ErrorFactory::global().define(definition)
}

/// A defined error kind; the only way to obtain [`ErrorInstance`]s
#[derive(Debug, Clone)]
pub struct ErrorType {
    definition: Arc<ErrorTypeDefinition>,
    registry: Arc<Registry>,
}

impl ErrorType {
    #[must_use]
    #[inline]
    pub fn definition(&self) -> &ErrorTypeDefinition {
        &self.definition
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    #[inline]
    pub fn code(&self) -> &str {
        &self.definition.code
    }

    #[must_use]
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.definition.namespace.as_deref()
    }

    #[must_use]
    #[inline]
    pub fn help(&self) -> Option<&str> {
        self.definition.help.as_deref()
    }

    #[must_use]
    #[inline]
    pub fn expose(&self) -> bool {
        self.definition.expose
    }

    /// The type URI an instance constructed right now would carry
    #[must_use]
    pub fn type_uri(&self) -> String {
        let prefix = self.registry.type_prefix();
        match self.namespace() {
            Some(ns) => format!("{prefix}{ns}/{}", self.code()),
            None => format!("{prefix}{}", self.code()),
        }
    }

    /// Construct with the default message and no metadata
    #[must_use]
    #[inline(never)]
    pub fn new_error(&self) -> ErrorInstance {
        self.construct(None, Metadata::new())
    }

    /// Construct with a message override
    #[must_use]
    #[inline(never)]
    pub fn with_message<S: Into<String>>(&self, message: S) -> ErrorInstance {
        self.construct(Some(message.into()), Metadata::new())
    }

    /// Construct with the default message and metadata
    #[must_use]
    #[inline(never)]
    pub fn with_metadata(&self, metadata: Metadata) -> ErrorInstance {
        self.construct(None, metadata)
    }

    /// Construct an instance
    ///
    /// An absent or empty `message` falls back to the definition's default.
    /// The registry prefix is read now, so later prefix changes do not affect
    /// the returned instance.
    #[must_use]
    #[inline(never)]
    pub fn construct(&self, message: Option<String>, metadata: Metadata) -> ErrorInstance {
        let message = match message {
            Some(message) if !message.is_empty() => message,
            _ => self.definition.default_message().to_owned(),
        };
        let instance = self.registry.next_instance_id();
        let frames = if self.definition.stack_trace {
            CapturedStack::capture()
        } else {
            CapturedStack::empty()
        };

        trace!(code = %self.code(), %instance, "Constructed error instance");

        ErrorInstance::new(
            Arc::clone(&self.definition),
            message,
            instance,
            self.type_uri(),
            frames,
            metadata,
        )
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    fn factory() -> ErrorFactory {
        let system = MockSystem::new().with_time(1_000).unwrap();
        ErrorFactory::new(Arc::new(Registry::with_system(Arc::new(system))))
    }

    #[test]
    fn define_rejects_missing_code() {
        let err = factory()
            .define(ErrorTypeDefinition::new("ErrorA", " "))
            .unwrap_err();
        assert!(matches!(err, ErrtypeError::Definition { .. }));
    }

    #[test]
    fn empty_message_uses_default() {
        let error_a = factory()
            .define(ErrorTypeDefinition::new("ErrorA", "error_a").message("This is error A"))
            .unwrap();
        assert_eq!(error_a.with_message("").message(), "This is error A");
    }

    #[test]
    fn stack_free_types_capture_only_the_header() {
        let quiet = factory()
            .define(ErrorTypeDefinition::new("Quiet", "quiet").stack_trace(false))
            .unwrap();
        let err = quiet.with_message("shh");
        assert_eq!(err.stack(), format!("Quiet: shh [{}]", err.instance()));
    }

    #[test]
    fn type_uri_tracks_registry_until_construction() {
        let factory = factory();
        let ns = factory
            .define(ErrorTypeDefinition::new("N", "namespaced").namespace("mystuff"))
            .unwrap();
        assert_eq!(ns.type_uri(), "mystuff/namespaced");

        factory.registry().set_type_prefix("urn:err:");
        let err = ns.new_error();
        assert_eq!(err.type_uri(), "urn:err:mystuff/namespaced");
    }
}
