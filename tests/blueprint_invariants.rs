//! Blueprint Invariant Tests
//!
//! End-to-end behavior of schema evaluation:
//! - Every field is visited and every failure reported
//! - Output holds only declared fields
//! - Nested schemas and registered blueprints report dotted keys
//! - Nullable variants keep null and undefined apart
//! - Array fields pass or fail as a whole
//! - Failing validators never abort their siblings

use blueprint::{
    optional, range, required, Options, RangeOptions, Registry, Schema, ValidationContext,
    ValidationError, Validator, Value,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn registry() -> Registry {
    Registry::with_builtins()
}

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn messages(result: Result<Value, ValidationError>) -> Vec<String> {
    match result {
        Err(err) => err.messages(),
        Ok(value) => panic!("expected validation to fail, got {:?}", value),
    }
}

// =============================================================================
// Required / Optional Strings
// =============================================================================

#[test]
fn test_required_and_optional_strings_pass() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("a", "string").field("b", "string?"))
        .unwrap();

    let output = bp.validate(&input(json!({ "a": "hello" }))).unwrap();

    assert_eq!(output.get("a"), &Value::from("hello"));
    assert!(output.get("b").is_undefined());
}

#[test]
fn test_required_and_optional_strings_fail_together() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("a", "string").field("b", "string?"))
        .unwrap();

    let err = bp.validate(&input(json!({ "a": null, "b": 42 }))).unwrap_err();

    assert_eq!(
        err.messages(),
        vec![
            "expected `a` {null} to be {string}",
            "expected `b` {number} to be {string}"
        ]
    );
    assert_eq!(
        err.to_string(),
        "Invalid sut: expected `a` {null} to be {string}, expected `b` {number} to be {string}"
    );
}

#[test]
fn test_empty_string_is_rejected() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("emptyString", "string"))
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({ "emptyString": "   " })))),
        vec!["expected `emptyString` {string} to not be an empty string"]
    );
}

// =============================================================================
// Property Pollution
// =============================================================================

#[test]
fn test_undeclared_fields_are_dropped() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new()
                .field("name", "string")
                .field("address", Schema::new().field("city", "string")),
        )
        .unwrap();

    let output = bp
        .validate(&input(json!({
            "name": "Ada",
            "__proto__": { "admin": true },
            "address": { "city": "London", "constructor": "x" },
        })))
        .unwrap();

    assert_eq!(
        output,
        input(json!({ "name": "Ada", "address": { "city": "London" } }))
    );
}

// =============================================================================
// Null Propagation
// =============================================================================

#[test]
fn test_nullable_keeps_null_and_undefined_apart() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("n", "number?"))
        .unwrap();

    let with_null = bp.validate(&input(json!({ "n": null }))).unwrap();
    let with_undefined = bp.validate(&input(json!({}))).unwrap();

    assert_eq!(with_null.get("n"), &Value::Null);
    assert_eq!(with_undefined.get("n"), &Value::Undefined);
}

#[test]
fn test_default_replaces_both_null_and_undefined() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field("n", optional("number").with_default(42)),
        )
        .unwrap();

    assert_eq!(
        bp.validate(&input(json!({ "n": null }))).unwrap().get("n"),
        &Value::from(42)
    );
    assert_eq!(
        bp.validate(&input(json!({}))).unwrap().get("n"),
        &Value::from(42)
    );
    assert_eq!(
        bp.validate(&input(json!({ "n": 7 }))).unwrap().get("n"),
        &Value::from(7)
    );
}

// =============================================================================
// Arrays
// =============================================================================

#[test]
fn test_array_passes_whole_and_transforms_elements() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("tags", "string[]"))
        .unwrap();

    let output = bp.validate(&input(json!({ "tags": [" a ", "b"] }))).unwrap();
    assert_eq!(output.get("tags"), &input(json!(["a", "b"])));
}

#[test]
fn test_array_fails_whole_with_indexed_keys() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("tags", "string[]"))
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({ "tags": ["a", 1, "c", null] })))),
        vec![
            "expected `tags[1]` {number} to be {string}",
            "expected `tags[3]` {null} to be {string}"
        ]
    );
}

#[test]
fn test_legacy_array_spelling() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("nums", "array<number>?"))
        .unwrap();

    assert!(bp.validate(&input(json!({ "nums": [1, 2] }))).is_ok());
    assert!(bp.validate(&input(json!({ "nums": null }))).is_ok());
    assert!(bp.validate(&input(json!({ "nums": ["1"] }))).is_err());
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn test_inline_nested_schema_uses_dotted_keys() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field(
                "grandParent",
                Schema::new().field("parent", Schema::new().field("child", Schema::new().field("requiredString", "string"))),
            ),
        )
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({ "grandParent": { "parent": { "child": {} } } })))),
        vec!["expected `grandParent.parent.child.requiredString` {undefined} to be {string}"]
    );
}

#[test]
fn test_registered_blueprint_reports_referencing_key() {
    let registry = registry();
    registry
        .register_blueprint(
            "Author",
            Schema::new().field("firstName", "string").field("lastName", "string"),
        )
        .unwrap();
    let bp = registry
        .blueprint("sut", Schema::new().field("user", "Author"))
        .unwrap();

    let err = bp.validate(&input(json!({ "user": { "firstName": "John" } }))).unwrap_err();

    assert_eq!(
        err.messages(),
        vec!["expected `user.lastName` {undefined} to be {string}"]
    );
    assert!(!err.to_string().contains("Author"));
}

#[test]
fn test_registered_blueprint_arrays() {
    let registry = registry();
    registry
        .register_blueprint("Author", Schema::new().field("firstName", "string"))
        .unwrap();
    let bp = registry
        .blueprint("sut", Schema::new().field("users", "Author[]").field("editor", "Author?"))
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({ "users": [{ "firstName": "a" }, {}] })))),
        vec!["expected `users[1].firstName` {undefined} to be {string}"]
    );

    let output = bp
        .validate(&input(json!({ "users": [{ "firstName": " a ", "x": 1 }] })))
        .unwrap();
    assert_eq!(output.get("users"), &input(json!([{ "firstName": "a" }])));
    assert!(output.get("editor").is_undefined());
}

#[test]
fn test_nested_failures_are_spliced_in_field_order() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new()
                .field("first", "string")
                .field("inner", Schema::new().field("a", "number").field("b", "number"))
                .field("last", "string"),
        )
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({})))),
        vec![
            "expected `first` {undefined} to be {string}",
            "expected `inner.a` {undefined} to be {number}",
            "expected `inner.b` {undefined} to be {number}",
            "expected `last` {undefined} to be {string}"
        ]
    );
}

#[test]
fn test_validators_can_read_the_root() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field("kind", "string").field(
                "details",
                Schema::new().field(
                    "size",
                    Validator::from_fn(|ctx: &ValidationContext<'_>| {
                        ctx.root.get("kind") == &Value::from("big") && ctx.value.as_f64() > Some(10.0)
                    }),
                ),
            ),
        )
        .unwrap();

    assert!(bp.validate(&input(json!({ "kind": "big", "details": { "size": 11 } }))).is_ok());
    assert_eq!(
        messages(bp.validate(&input(json!({ "kind": "small", "details": { "size": 11 } })))),
        vec!["expected `details.size` {number} to be valid"]
    );
}

// =============================================================================
// Failing Validators
// =============================================================================

#[test]
fn test_panicking_validator_does_not_abort_siblings() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new()
                .field("before", "string")
                .field(
                    "boom",
                    Validator::from_fn(|_: &ValidationContext<'_>| -> bool { panic!("boom") }),
                )
                .field("after", "number"),
        )
        .unwrap();

    let err = bp
        .validate(&input(json!({ "before": "ok", "boom": 1, "after": "nope" })))
        .unwrap_err();

    assert_eq!(
        err.messages(),
        vec!["boom", "expected `after` {string} to be {number}"]
    );
}

#[test]
fn test_panicking_wrapper_hooks_do_not_abort_siblings() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new()
                .field(
                    "derived",
                    required("number").from(|_: &ValidationContext<'_>| -> Value { panic!("boom") }),
                )
                .field(
                    "defaulted",
                    optional("number").with_default_fn(|| -> Value { panic!("no default") }),
                )
                .field("after", "string"),
        )
        .unwrap();

    let err = bp.validate(&input(json!({ "derived": 1, "after": 2 }))).unwrap_err();

    assert_eq!(
        err.messages(),
        vec!["boom", "no default", "expected `after` {number} to be {string}"]
    );
}

#[test]
fn test_panicking_validator_keeps_the_field_key() {
    let validator = Validator::from_fn(|_: &ValidationContext<'_>| -> bool { panic!("boom") });
    let err = validator
        .validate(&ValidationContext::for_value("boom", Value::from(1)))
        .unwrap_err();

    assert_eq!(err.key(), Some("boom"));
}

#[test]
fn test_error_returning_validator() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field(
                "code",
                Validator::from_fn(|ctx: &ValidationContext<'_>| -> Result<Value, String> {
                    Err(format!("{} is not allowed", ctx.key))
                }),
            ),
        )
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({ "code": 1 })))),
        vec!["code is not allowed"]
    );
}

#[test]
fn test_unresolved_names_do_not_abort_the_pass() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("a", "unicorn").field("b", "string"))
        .unwrap();

    assert_eq!(
        messages(bp.validate(&input(json!({ "a": 1 })))),
        vec![
            "I don't know how to validate `unicorn`",
            "expected `b` {undefined} to be {string}"
        ]
    );
}

// =============================================================================
// Comparators In Schemas
// =============================================================================

#[test]
fn test_range_field() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field("n", range(RangeOptions::new().gt(10.0).lt(20.0)).unwrap()),
        )
        .unwrap();

    let results: Vec<bool> = [8, 10, 15, 20, 21]
        .iter()
        .map(|n| bp.validate(&input(json!({ "n": n }))).is_ok())
        .collect();
    assert_eq!(results, vec![false, false, true, false, false]);
}

#[test]
fn test_required_from_reads_another_field() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field(
                "displayName",
                required("string").from(|ctx: &ValidationContext<'_>| ctx.input.get("name").clone()),
            ),
        )
        .unwrap();

    let output = bp.validate(&input(json!({ "name": " Ada " }))).unwrap();
    assert_eq!(output, input(json!({ "displayName": "Ada" })));
}

#[test]
fn test_derived_undefined_never_leaks_the_raw_value() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field(
                "name",
                optional("string").from(|ctx: &ValidationContext<'_>| ctx.input.get("alias").clone()),
            ),
        )
        .unwrap();

    let output = bp.validate(&input(json!({ "name": 42 }))).unwrap();
    assert!(output.get("name").is_undefined());

    let output = bp.validate(&input(json!({ "name": 42, "alias": null }))).unwrap();
    assert_eq!(output.get("name"), &Value::Null);

    assert_eq!(
        messages(bp.validate(&input(json!({ "name": "Ada", "alias": 7 })))),
        vec!["expected `name` {number} to be {string}"]
    );
}

#[test]
fn test_unit_validator_stores_the_raw_value() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new().field("note", Validator::from_fn(|_: &ValidationContext<'_>| {})),
        )
        .unwrap();

    let output = bp.validate(&input(json!({ "note": "kept" }))).unwrap();
    assert_eq!(output.get("note"), &Value::from("kept"));
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_qualified_key_style() {
    let bp = registry()
        .blueprint(
            "sut",
            Schema::new()
                .field("requiredString", "string")
                .field("inner", Schema::new().field("n", "number")),
        )
        .unwrap()
        .with_options(Options::qualified());

    assert_eq!(
        messages(bp.validate(&input(json!({})))),
        vec![
            "expected `sut.requiredString` {undefined} to be {string}",
            "expected `sut.inner.n` {undefined} to be {number}"
        ]
    );
}

// =============================================================================
// Missing Input
// =============================================================================

#[test]
fn test_null_input_fails_fields_without_panicking() {
    let bp = registry()
        .blueprint("sut", Schema::new().field("a", "string").field("b", "any?"))
        .unwrap();

    assert_eq!(
        messages(bp.validate(&Value::Null)),
        vec!["expected `a` {undefined} to be {string}"]
    );
}
