//! Blueprint Property Tests
//!
//! Properties checked over generated inputs:
//! - Validation is idempotent
//! - Output never carries undeclared keys
//! - Every `is::not` predicate is the exact negation of its `is` twin

use blueprint::{is, optional, Registry, Schema, Value};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn json_value() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i32>().prop_map(|n| serde_json::json!(n)),
        (-1000i32..1000, 1u32..4).prop_map(|(n, d)| serde_json::json!(f64::from(n) / f64::from(d * 10))),
        "[a-zA-Z0-9_ ]{0,12}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Objects that usually share keys with the schema below, plus noise
fn json_object() -> impl Strategy<Value = serde_json::Value> {
    let key = prop_oneof![
        Just("name".to_string()),
        Just("age".to_string()),
        Just("tags".to_string()),
        Just("address".to_string()),
        "[a-z]{1,6}",
    ];
    prop::collection::btree_map(key, json_value(), 0..8)
        .prop_map(|m| serde_json::Value::Object(m.into_iter().collect()))
}

fn schema() -> Schema {
    Schema::new()
        .field("name", "string?")
        .field("age", optional("number").with_default(0))
        .field("tags", "string[]?")
        .field("address", Schema::new().field("city", "any?"))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Same input, same schema, same result.
    #[test]
    fn validation_is_idempotent(json in json_object()) {
        let bp = Registry::with_builtins().blueprint("sut", schema()).unwrap();
        let input = Value::from(json);

        prop_assert_eq!(bp.validate(&input), bp.validate(&input));
    }

    /// Successful output holds exactly the declared keys.
    #[test]
    fn output_has_only_declared_keys(json in json_object()) {
        let bp = Registry::with_builtins().blueprint("sut", schema()).unwrap();

        if let Ok(output) = bp.validate(&Value::from(json)) {
            let keys: Vec<&str> = output
                .as_object()
                .map(|map| map.keys().map(String::as_str).collect())
                .unwrap_or_default();
            prop_assert_eq!(keys, vec!["address", "age", "name", "tags"]);
        }
    }

    /// Validation never panics on arbitrary input, objects or not.
    #[test]
    fn validation_is_total(json in json_value()) {
        let bp = Registry::with_builtins().blueprint("sut", schema()).unwrap();
        let _ = bp.validate(&Value::from(json));
    }

    /// `is::not::X` is `!is::X` for every value.
    #[test]
    fn negations_are_exact(json in json_value()) {
        let value = Value::from(json);

        prop_assert_eq!(is::not::string(&value), !is::string(&value));
        prop_assert_eq!(is::not::number(&value), !is::number(&value));
        prop_assert_eq!(is::not::object(&value), !is::object(&value));
        prop_assert_eq!(is::not::array(&value), !is::array(&value));
        prop_assert_eq!(is::not::primitive(&value), !is::primitive(&value));
        prop_assert_eq!(is::not::null_or_whitespace(&value), !is::null_or_whitespace(&value));
        prop_assert_eq!(is::not::decimal(&value, Some(1)), !is::decimal(&value, Some(1)));
    }
}
