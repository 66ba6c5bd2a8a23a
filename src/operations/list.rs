//! List the error types defined by a catalog

use crate::config::ErrorTypes;
use std::fmt::Write as _;

/// One line per type: `<key>\t<name>\t<type uri>`, with an indented help line
/// when the type has help text
#[must_use]
pub fn list_types(types: &ErrorTypes) -> String {
    let mut out = String::new();
    for (key, error_type) in types.iter() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{key}\t{}\t{}", error_type.name(), error_type.type_uri());
        if let Some(help) = error_type.help() {
            let _ = writeln!(out, "  help: {help}");
        }
    }
    out
}
