//! Static description of one kind of error

use crate::error::ErrtypeError;
use serde::{Deserialize, Serialize};

/// Message used when a definition supplies none
pub const FALLBACK_MESSAGE: &str = "Error";

/// Definition of an error type, supplied once per error kind
///
/// Deserializes from catalog entries using camelCase keys (`stackTrace`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ErrorTypeDefinition {
    /// Display name, e.g. `ErrorA`
    pub name: String,

    /// Stable machine identifier, e.g. `error_a`
    pub code: String,

    /// Default message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Remediation text for humans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Advisory flag for transport layers
    #[serde(default)]
    pub expose: bool,

    /// Optional path segment inserted into the type URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Whether instances capture call frames
    #[serde(default = "default_stack_trace")]
    pub stack_trace: bool,
}

const fn default_stack_trace() -> bool {
    return true;
}

impl ErrorTypeDefinition {
    /// Create a definition with the required fields and all defaults
    #[inline]
    pub fn new<N: Into<String>, C: Into<String>>(name: N, code: C) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            message: None,
            help: None,
            expose: false,
            namespace: None,
            stack_trace: true,
        }
    }

    /// Set the default message
    #[must_use]
    #[inline]
    pub fn message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the help text
    #[must_use]
    #[inline]
    pub fn help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Mark instances as safe to show to external clients
    #[must_use]
    #[inline]
    pub fn expose(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    /// Set the namespace
    #[must_use]
    #[inline]
    pub fn namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Enable or disable call frame capture
    #[must_use]
    #[inline]
    pub fn stack_trace(mut self, stack_trace: bool) -> Self {
        self.stack_trace = stack_trace;
        self
    }

    /// The message used when construction supplies none
    #[must_use]
    #[inline]
    pub fn default_message(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => FALLBACK_MESSAGE,
        }
    }

    /// Lookup key: `namespace/code`, or just `code`
    #[must_use]
    #[inline]
    pub fn key(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) => format!("{ns}/{}", self.code),
            None => self.code.clone(),
        }
    }

    /// Check required fields and normalise optional ones
    ///
    /// An empty namespace is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `name` is empty or whitespace
    /// - `code` is empty or whitespace
    pub fn normalize(mut self) -> Result<Self, ErrtypeError> {
        if self.name.trim().is_empty() {
            return Err(ErrtypeError::definition(format!(
                "Error type with code '{}' has no name",
                self.code
            )));
        }
        if self.code.trim().is_empty() {
            return Err(ErrtypeError::definition(format!(
                "Error type '{}' has no code",
                self.name
            )));
        }
        if self.namespace.as_deref().is_some_and(str::is_empty) {
            self.namespace = None;
        }
        Ok(self)
    }
}
