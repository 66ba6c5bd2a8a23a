//! A single occurrence of a defined error type

use super::definition::ErrorTypeDefinition;
use super::metadata::{MetaValue, Metadata};
use super::stack::CapturedStack;
use crate::identity::InstanceId;
use serde::ser::SerializeMap as _;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{self, Write as _};
use std::sync::{Arc, OnceLock};

/// An error value produced by [`super::ErrorType`]
///
/// All fields are fixed at construction. The call stack is recorded then too,
/// but its text is only built the first time [`ErrorInstance::stack`] or
/// [`ErrorInstance::render_diagnostic`] asks for it. `Display` yields the string form,
/// `Serialize` yields the canonical JSON object:
/// `message`, `instance`, `code`, `namespace` (when defined), `type`, then
/// metadata in insertion order. `help`, `expose` and `stack` are never
/// serialized.
#[derive(Debug, Clone)]
pub struct ErrorInstance {
    definition: Arc<ErrorTypeDefinition>,
    message: String,
    instance: InstanceId,
    type_uri: String,
    frames: CapturedStack,
    stack: OnceLock<String>,
    metadata: Metadata,
}

impl ErrorInstance {
    pub(crate) fn new(
        definition: Arc<ErrorTypeDefinition>,
        message: String,
        instance: InstanceId,
        type_uri: String,
        frames: CapturedStack,
        metadata: Metadata,
    ) -> Self {
        Self {
            definition,
            message,
            instance,
            type_uri,
            frames,
            stack: OnceLock::new(),
            metadata,
        }
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Unique identifier of this occurrence
    #[must_use]
    #[inline]
    pub const fn instance(&self) -> InstanceId {
        self.instance
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

    /// `typePrefix + [namespace + "/"] + code`, fixed at construction
    #[must_use]
    #[inline]
    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    #[must_use]
    #[inline]
    pub fn expose(&self) -> bool {
        self.definition.expose
    }

    #[must_use]
    #[inline]
    pub fn help(&self) -> Option<&str> {
        self.definition.help.as_deref()
    }

    /// Header line followed by one `    at ...` line per captured frame
    #[must_use]
    #[inline]
    pub fn stack(&self) -> &str {
        self.stack.get_or_init(|| {
            let mut stack = header(self.name(), &self.message, self.instance);
            for frame in self.frames.frames() {
                // Writing into a String cannot fail.
                let _ = write!(stack, "\n{frame}");
            }
            stack
        })
    }

    #[must_use]
    #[inline]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Look up one metadata field
    #[must_use]
    #[inline]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    /// `<name>: <message> [<instance>]`, then ` key=value, ...` when metadata exists
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = header(self.name(), &self.message, self.instance);
        if !self.metadata.is_empty() {
            let pairs: Vec<String> = self
                .metadata
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            out.push(' ');
            out.push_str(&pairs.join(", "));
        }
        out
    }

    /// Object-style dump for interactive debugging
    ///
    /// Starts with `{ ` and the stack (header first), then lists the
    /// remaining fields as `  key: value` entries.
    #[must_use]
    pub fn render_diagnostic(&self) -> String {
        let mut entries = vec![
            format!("  instance: {}", quote(&self.instance.to_string())),
            format!("  code: {}", quote(self.code())),
        ];
        if let Some(ns) = self.namespace() {
            entries.push(format!("  namespace: {}", quote(ns)));
        }
        entries.push(format!("  type: {}", quote(&self.type_uri)));
        entries.push(format!("  expose: {}", self.expose()));
        for (key, value) in &self.metadata {
            let rendered = match *value {
                MetaValue::Str(ref s) => quote(s),
                ref other => other.to_string(),
            };
            entries.push(format!("  {key}: {rendered}"));
        }

        format!("{{ {}\n{} }}", self.stack(), entries.join(",\n"))
    }

    /// Canonical JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - serde_json fails to serialize (not expected for scalar fields)
    #[inline]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn header(name: &str, message: &str, instance: InstanceId) -> String {
    format!("{name}: {message} [{instance}]")
}

/// Single-quoted string literal, escaping quotes and backslashes
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

impl fmt::Display for ErrorInstance {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Error for ErrorInstance {}

impl Serialize for ErrorInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fixed = if self.namespace().is_some() { 5 } else { 4 };
        let mut map = serializer.serialize_map(Some(fixed + self.metadata.len()))?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("instance", &self.instance)?;
        map.serialize_entry("code", self.code())?;
        if let Some(ns) = self.namespace() {
            map.serialize_entry("namespace", ns)?;
        }
        map.serialize_entry("type", &self.type_uri)?;
        for (key, value) in &self.metadata {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
