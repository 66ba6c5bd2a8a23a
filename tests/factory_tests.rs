//! Behaviour of defined error types and their instances
//!
//! Covers:
//! - Default and overridden messages
//! - Instance identifiers (length, uniqueness, ordering), with and without stacks
//! - String, diagnostic and JSON renderings
//! - Registry prefix handling

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use errtype::factory::{
        ErrorFactory, ErrorInstance, ErrorType, ErrorTypeDefinition, MetaValue, Metadata,
    };
    use errtype::registry::Registry;
    use errtype::{ErrtypeError, metadata};
    use std::collections::HashSet;
    use std::sync::Arc;

    const PREFIX: &str = "https://example.com/errors/";

    struct Fixture {
        registry: Arc<Registry>,
        error_a: ErrorType,
        exposed: ErrorType,
        namespaced: ErrorType,
        stack_free: ErrorType,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(Registry::new().with_type_prefix(PREFIX));
        let factory = ErrorFactory::new(Arc::clone(&registry));
        Fixture {
            error_a: factory
                .define(
                    ErrorTypeDefinition::new("ErrorA", "error_a")
                        .message("This is error A")
                        .help("Error a help"),
                )
                .unwrap(),
            exposed: factory
                .define(
                    ErrorTypeDefinition::new("ExposedError", "exposed")
                        .help("Exposed help")
                        .expose(true),
                )
                .unwrap(),
            namespaced: factory
                .define(
                    ErrorTypeDefinition::new("NamespaceError", "namespaced")
                        .help("Exposed help")
                        .namespace("mystuff"),
                )
                .unwrap(),
            stack_free: factory
                .define(
                    ErrorTypeDefinition::new("StackFreeError", "stack_free")
                        .help("No stack trace here")
                        .stack_trace(false),
                )
                .unwrap(),
            registry,
        }
    }

    #[test]
    fn default_message() {
        let f = fixture();
        assert_eq!(f.error_a.new_error().message(), "This is error A");
        assert_eq!(f.exposed.new_error().message(), "Error");
    }

    #[test]
    fn custom_message() {
        let f = fixture();
        assert_eq!(
            f.error_a.with_message("Custom message").message(),
            "Custom message"
        );
    }

    #[test]
    fn instance_id_on_each_error() {
        let f = fixture();
        let err = f.error_a.new_error();
        assert_eq!(err.instance().to_string().len(), 26);
    }

    fn assert_unique_and_ordered(error_type: &ErrorType) -> ErrorInstance {
        let mut seen = HashSet::new();
        let mut previous = None;
        let mut last = error_type.new_error();
        for _ in 0..10_000 {
            let err = error_type.new_error();
            let id = err.instance();
            assert!(seen.insert(id.to_string()));
            if let Some(prev) = previous {
                assert!(prev < id);
            }
            previous = Some(id);
            last = err;
        }
        assert_eq!(seen.len(), 10_000);
        last
    }

    #[test]
    fn instance_ids_are_unique_and_ordered() {
        let f = fixture();
        assert_unique_and_ordered(&f.stack_free);
    }

    #[test]
    fn stack_enabled_instance_ids_are_unique_and_ordered() {
        let f = fixture();
        let last = assert_unique_and_ordered(&f.error_a);
        let header = format!("ErrorA: This is error A [{}]", last.instance());
        assert!(last.stack().starts_with(&header));
    }

    #[test]
    fn to_string_includes_instance() {
        let f = fixture();
        let err = f.error_a.with_message("Custom message.");
        assert_eq!(
            err.to_string(),
            format!("ErrorA: Custom message. [{}]", err.instance())
        );
        assert_eq!(err.render(), err.to_string());
    }

    #[test]
    fn diagnostic_includes_instance() {
        let f = fixture();
        let err = f.error_a.with_message("Custom message.");
        let dump = err.render_diagnostic();
        assert!(dump.starts_with(&format!(
            "{{ ErrorA: Custom message. [{}]\n",
            err.instance()
        )));
        assert!(dump.contains("  code: 'error_a'"));
        assert!(dump.ends_with(" }"));
    }

    #[test]
    fn type_and_json() {
        let f = fixture();
        let err = f.error_a.new_error();
        assert_eq!(err.type_uri(), "https://example.com/errors/error_a");
        assert_eq!(
            err.to_json().unwrap(),
            format!(
                r#"{{"message":"This is error A","instance":"{}","code":"error_a","type":"https://example.com/errors/error_a"}}"#,
                err.instance()
            )
        );
    }

    #[test]
    fn code() {
        let f = fixture();
        assert_eq!(f.error_a.new_error().code(), "error_a");
    }

    #[test]
    fn expose() {
        let f = fixture();
        assert!(f.exposed.new_error().expose());
        assert!(!f.error_a.new_error().expose());
    }

    #[test]
    fn help_is_readable_but_not_serialized() {
        let f = fixture();
        let err = f.error_a.new_error();
        assert_eq!(err.help(), Some("Error a help"));
        assert!(!err.to_json().unwrap().contains("help"));
    }

    #[test]
    fn namespace() {
        let f = fixture();
        let err = f.namespaced.new_error();
        assert_eq!(err.namespace(), Some("mystuff"));
        assert_eq!(
            err.type_uri(),
            "https://example.com/errors/mystuff/namespaced"
        );
        assert_eq!(
            err.to_json().unwrap(),
            format!(
                r#"{{"message":"Error","instance":"{}","code":"namespaced","namespace":"mystuff","type":"https://example.com/errors/mystuff/namespaced"}}"#,
                err.instance()
            )
        );
    }

    #[test]
    fn meta() {
        let f = fixture();
        let err = f.error_a.construct(
            Some("With meta".to_owned()),
            metadata! { "a" => 1, "b" => "two" }.unwrap(),
        );
        assert_eq!(err.get("a"), Some(&MetaValue::Int(1)));
        assert_eq!(err.get("b"), Some(&MetaValue::Str("two".to_owned())));
        assert_eq!(
            err.to_string(),
            format!("ErrorA: With meta [{}] a=1, b=two", err.instance())
        );
        assert_eq!(
            err.to_json().unwrap(),
            format!(
                r#"{{"message":"With meta","instance":"{}","code":"error_a","type":"https://example.com/errors/error_a","a":1,"b":"two"}}"#,
                err.instance()
            )
        );
    }

    #[test]
    fn metadata_with_default_message() {
        let f = fixture();
        let meta = Metadata::new().with("retry", true).unwrap();
        let err = f.error_a.with_metadata(meta);
        assert_eq!(
            err.to_string(),
            format!("ErrorA: This is error A [{}] retry=true", err.instance())
        );
    }

    #[test]
    fn reserved_metadata_keys_are_rejected() {
        let err = Metadata::new().with("instance", "forged").unwrap_err();
        assert_eq!(err, ErrtypeError::reserved_key("instance"));
    }

    #[test]
    fn stack_trace_free() {
        let f = fixture();
        let err = f.stack_free.with_message("My message.");
        assert_eq!(
            err.stack(),
            format!("StackFreeError: My message. [{}]", err.instance())
        );
    }

    #[test]
    fn prefix_is_read_at_construction() {
        let f = fixture();
        let before = f.error_a.new_error();
        f.registry.set_type_prefix("urn:errors:");
        let after = f.error_a.new_error();

        assert_eq!(before.type_uri(), "https://example.com/errors/error_a");
        assert_eq!(after.type_uri(), "urn:errors:error_a");
    }

    #[test]
    fn isolated_registries_do_not_interfere() {
        let a = fixture();
        let b = fixture();
        b.registry.set_type_prefix("");
        assert!(a.error_a.new_error().type_uri().starts_with(PREFIX));
        assert_eq!(b.error_a.new_error().type_uri(), "error_a");
    }

    #[test]
    fn instances_are_std_errors() {
        let f = fixture();
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(f.error_a.new_error());
        assert!(boxed.to_string().starts_with("ErrorA: This is error A ["));

        let as_anyhow = anyhow::Error::new(f.exposed.new_error());
        let recovered = as_anyhow.downcast_ref::<errtype::ErrorInstance>().unwrap();
        assert_eq!(recovered.code(), "exposed");
    }
}
