//! YAML catalog loading and parsing

use crate::config::Catalog;
use crate::system::System;
use anyhow::{Context as _, Result, anyhow};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load and parse a YAML catalog from file
pub fn load_catalog(system: &dyn System, path: &str) -> Result<Catalog> {
    let path_obj = Path::new(path);

    // Check if file exists using System trait
    if !system.exists(path_obj) {
        return Err(anyhow!(
            "Catalog file not found: {path}\n\
            Create an errtype.yaml file or specify a different path with --catalog"
        ));
    }

    // Read file contents using System trait
    let content = system
        .read_to_string(path_obj)
        .with_context(|| format!("Failed to read catalog file: {path}"))?;

    let catalog = parse_catalog(&content)
        .with_context(|| format!("Invalid catalog in file: {path}"))?;

    debug!(
        "Loaded {} error definitions from {}",
        catalog.errors.len(),
        path
    );
    Ok(catalog)
}

/// Parse and validate a YAML catalog
///
/// The raw document is checked against the JSON schema before it is mapped
/// onto [`Catalog`], so unknown keys are reported rather than dropped.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let raw: Value = serde_yaml::from_str(content).context(
        "Failed to parse YAML catalog\n\
        Please check the syntax and structure of your catalog file",
    )?;

    crate::config::schema::validate_against_schema(&raw)
        .context("Catalog validation failed")?;

    let catalog: Catalog =
        serde_json::from_value(raw).context("Failed to read catalog structure")?;

    crate::config::validation::validate_catalog(&catalog)
        .context("Catalog validation failed")?;

    Ok(catalog)
}
