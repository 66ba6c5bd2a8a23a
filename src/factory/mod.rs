//! Error type factory
//!
//! Define each error kind once with an [`ErrorTypeDefinition`], then
//! construct [`ErrorInstance`]s from the resulting [`ErrorType`] wherever the
//! error occurs.
//!
//! ```
//! use errtype::factory::{ErrorFactory, ErrorTypeDefinition};
//! use errtype::registry::Registry;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::new().with_type_prefix("https://example.com/errors/"));
//! let factory = ErrorFactory::new(registry);
//! let not_found = factory
//!     .define(ErrorTypeDefinition::new("NotFound", "not_found").message("Resource not found"))
//!     .unwrap();
//!
//! let err = not_found.new_error();
//! assert_eq!(err.type_uri(), "https://example.com/errors/not_found");
//! assert_eq!(err.to_string(), format!("NotFound: Resource not found [{}]", err.instance()));
//! ```

pub mod definition;
pub mod error_type;
pub mod instance;
pub mod metadata;
pub mod stack;

pub use definition::*;
pub use error_type::*;
pub use instance::*;
pub use metadata::*;
