//! Error catalog configuration
//!
//! Handles YAML catalog parsing, JSON schema validation, and resolution of
//! the effective type prefix

pub mod schema;
pub mod validation;
pub mod yaml;

use crate::error::ErrtypeError;
use crate::factory::{ErrorFactory, ErrorType, ErrorTypeDefinition};
use crate::system::System;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the catalog's `typePrefix`
pub const TYPE_PREFIX_ENV: &str = "ERRTYPE_TYPE_PREFIX";

/// Catalog of error type definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Prefix for type URIs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_prefix: Option<String>,

    /// Error type definitions, in declaration order
    pub errors: Vec<ErrorTypeDefinition>,
}

impl Catalog {
    /// Load catalog from file
    pub fn load_from_file(system: &dyn System, path: &str) -> anyhow::Result<Self> {
        yaml::load_catalog(system, path)
    }

    /// Load catalog from a YAML string
    pub fn load_from_string(content: &str) -> anyhow::Result<Self> {
        yaml::parse_catalog(content)
    }

    /// Validate catalog semantics
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate_catalog(self)
    }

    /// Prefix to use, by precedence: explicit override, environment, catalog
    #[must_use]
    pub fn effective_type_prefix(&self, system: &dyn System, cli_override: Option<&str>) -> String {
        if let Some(prefix) = cli_override {
            return prefix.to_owned();
        }
        if let Ok(prefix) = system.env_var(TYPE_PREFIX_ENV) {
            return prefix;
        }
        self.type_prefix.clone().unwrap_or_default()
    }

    /// Define every catalog entry with `factory`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any definition is missing its name or code
    pub fn define_all(&self, factory: &ErrorFactory) -> Result<ErrorTypes, ErrtypeError> {
        let mut types = IndexMap::with_capacity(self.errors.len());
        for definition in &self.errors {
            let error_type = factory.define(definition.clone())?;
            types.insert(definition.key(), error_type);
        }
        Ok(ErrorTypes(types))
    }
}

/// Defined error types keyed by `namespace/code` (or `code`)
#[derive(Debug, Clone, Default)]
pub struct ErrorTypes(IndexMap<String, ErrorType>);

impl ErrorTypes {
    /// Find a type by key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No type has this key
    pub fn get(&self, key: &str) -> Result<&ErrorType, ErrtypeError> {
        self.0
            .get(key)
            .ok_or_else(|| ErrtypeError::unknown_code(key))
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Types in catalog order
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ErrorType> {
        self.0.iter()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::system::MockSystem;
    use std::sync::Arc;

    const CATALOG: &str = r#"
typePrefix: "https://example.com/errors/"
errors:
  - name: ErrorA
    code: error_a
  - name: NamespaceError
    code: namespaced
    namespace: mystuff
"#;

    #[test]
    fn prefix_precedence() {
        let catalog = Catalog::load_from_string(CATALOG).unwrap();
        let bare = MockSystem::new();
        let with_env = MockSystem::new()
            .with_env(TYPE_PREFIX_ENV, "urn:env:")
            .unwrap();

        assert_eq!(
            catalog.effective_type_prefix(&bare, None),
            "https://example.com/errors/"
        );
        assert_eq!(catalog.effective_type_prefix(&with_env, None), "urn:env:");
        assert_eq!(
            catalog.effective_type_prefix(&with_env, Some("urn:cli:")),
            "urn:cli:"
        );
    }

    #[test]
    fn define_all_keys_by_namespace_and_code() {
        let catalog = Catalog::load_from_string(CATALOG).unwrap();
        let factory = ErrorFactory::new(Arc::new(Registry::new()));
        let types = catalog.define_all(&factory).unwrap();

        assert_eq!(types.len(), 2);
        assert_eq!(types.get("mystuff/namespaced").unwrap().name(), "NamespaceError");
        assert_eq!(types.get("error_a").unwrap().code(), "error_a");
        let err = types.get("namespaced").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
