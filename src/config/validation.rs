//! Catalog validation logic

use crate::config::Catalog;
use crate::factory::ErrorTypeDefinition;
use anyhow::{Result, anyhow};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PATH_SEGMENT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s/]+$").ok());

/// Validate a complete catalog
///
/// # Errors
///
/// Returns an error if:
/// - The catalog contains no error definitions
/// - A definition is invalid
/// - Two definitions share the same namespace and code
#[inline]
pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    if catalog.errors.is_empty() {
        return Err(anyhow!("Catalog must contain at least one error definition"));
    }

    let mut seen = HashSet::new();
    for (index, definition) in catalog.errors.iter().enumerate() {
        validate_definition(definition, index)?;

        let key = definition.key();
        if !seen.insert(key.clone()) {
            return Err(anyhow!(
                "Error #{}: Duplicate error code '{key}'",
                index + 1
            ));
        }
    }

    Ok(())
}

/// Validate a single error definition
fn validate_definition(definition: &ErrorTypeDefinition, index: usize) -> Result<()> {
    let context = format!("Error #{}", index + 1);

    if definition.name.trim().is_empty() {
        return Err(anyhow!("{context}: Name cannot be empty"));
    }

    validate_path_segment(&definition.code).map_err(|e| anyhow!("{context}: code {e}"))?;

    if let Some(namespace) = definition.namespace.as_deref()
        && !namespace.is_empty()
    {
        validate_path_segment(namespace).map_err(|e| anyhow!("{context}: namespace {e}"))?;
    }

    Ok(())
}

/// Validate that a value can stand alone as one URI path segment
///
/// # Errors
///
/// Returns an error if:
/// - The value is empty
/// - The value contains whitespace or `/`
#[inline]
pub fn validate_path_segment(segment: &str) -> Result<()> {
    let regex = PATH_SEGMENT
        .as_ref()
        .ok_or_else(|| anyhow!("Path segment pattern failed to compile"))?;
    if regex.is_match(segment) {
        return Ok(());
    }

    Err(anyhow!(
        "'{segment}' is not a valid path segment (must be non-empty, without whitespace or '/')"
    ))
}
