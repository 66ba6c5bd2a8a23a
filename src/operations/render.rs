//! Render a constructed error instance

use core::str::FromStr;

use crate::config::ErrorTypes;
use crate::error::ErrtypeError;
use crate::factory::{ErrorInstance, Metadata};
use anyhow::{Context as _, Result};

/// Output format for a rendered instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// `Name: message [instance] key=value`
    Text,
    /// Canonical JSON object
    Json,
    /// Object-style diagnostic dump
    Inspect,
    /// Header plus captured frames
    Stack,
}

impl FromStr for OutputFormat {
    type Err = ErrtypeError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "inspect" => Ok(Self::Inspect),
            "stack" => Ok(Self::Stack),
            _ => Err(ErrtypeError::configuration(format!(
                "Invalid format: {s}. Use 'text', 'json', 'inspect' or 'stack'"
            ))),
        }
    }
}

/// Construct an instance of `key` and render it
///
/// # Errors
///
/// Returns an error if:
/// - No type has this key
/// - JSON serialization fails
#[inline]
pub fn render_error(
    types: &ErrorTypes,
    key: &str,
    message: Option<String>,
    metadata: Metadata,
    format: OutputFormat,
) -> Result<String> {
    let error_type = types.get(key)?;
    let instance = error_type.construct(message, metadata);
    render_instance(&instance, format)
}

/// Render an existing instance in the requested format
///
/// # Errors
///
/// Returns an error if:
/// - JSON serialization fails
#[inline]
pub fn render_instance(instance: &ErrorInstance, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(instance.render()),
        OutputFormat::Json => instance
            .to_json()
            .context("Failed to serialize error instance to JSON"),
        OutputFormat::Inspect => Ok(instance.render_diagnostic()),
        OutputFormat::Stack => Ok(instance.stack().to_owned()),
    }
}
