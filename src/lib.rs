//! `errtype` - Identifiable error types with stable codes and instance ids
//!
//! Define each kind of error once, with a machine-readable code, an optional
//! namespace, help text and exposure policy. Every instance constructed from
//! that type gets a unique, time-ordered 26-character identifier, a `type`
//! URI built from the registry prefix, and consistent string, diagnostic and
//! JSON renderings.
//!
//! ```
//! use errtype::{ErrorTypeDefinition, define, metadata};
//!
//! let error_a = define(
//!     ErrorTypeDefinition::new("ErrorA", "error_a").message("This is error A"),
//! )
//! .unwrap();
//!
//! let err = error_a.construct(Some("With meta".to_owned()), metadata! { "a" => 1, "b" => "two" }.unwrap());
//! assert_eq!(err.to_string(), format!("ErrorA: With meta [{}] a=1, b=two", err.instance()));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod factory;
pub mod identity;
pub mod operations;
pub mod registry;
pub mod system;

pub use error::ErrtypeError;
pub use factory::{
    ErrorFactory, ErrorInstance, ErrorType, ErrorTypeDefinition, MetaValue, Metadata, define,
};
pub use identity::InstanceId;
pub use registry::Registry;

use anyhow::Result;
use cli::Args;
use config::Catalog;
use operations::{OutputFormat, list_types, render_error};
use std::sync::Arc;
use system::System;

/// Main entry point for the errtype binary
///
/// Loads the catalog, applies the effective type prefix, then either lists
/// the defined types or renders one constructed instance. Returns the text
/// to print.
pub fn run(args: &Args, system: Arc<dyn System>) -> Result<String> {
    let format = args.format.parse::<OutputFormat>()?;
    let metadata = args.parse_metadata()?;

    let catalog = Catalog::load_from_file(system.as_ref(), &args.catalog)?;
    let prefix = catalog.effective_type_prefix(system.as_ref(), args.type_prefix.as_deref());

    let registry = Arc::new(Registry::with_system(system).with_type_prefix(prefix));
    let types = catalog.define_all(&ErrorFactory::new(registry))?;

    if args.list {
        return Ok(list_types(&types));
    }

    let key = args
        .code
        .as_deref()
        .ok_or_else(|| ErrtypeError::configuration("Either --list or --code is required"))?;
    render_error(&types, key, args.message.clone(), metadata, format)
}
