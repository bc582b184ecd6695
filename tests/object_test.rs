//! Integration tests for object schema validation.

use hardhat_schema::{IssueCode, IssuePath, Schema, SchemaLike};
use serde_json::json;

/// Helper to extract the error value from a Validation
fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

#[test]
fn test_required_and_optional_fields() {
    let schema = Schema::object()
        .field("url", Schema::string().url())
        .optional("chainId", Schema::number().int());

    assert!(schema.safe_parse(&json!({ "url": "http://localhost:8545" })).is_success());

    let errors = unwrap_failure(schema.validate(&json!({ "chainId": 1 }), &IssuePath::root()));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "Required");
    assert_eq!(errors.first().path.to_json(), json!(["url"]));
}

#[test]
fn test_field_issues_accumulate_in_declaration_order() {
    let schema = Schema::object()
        .field("a", Schema::string())
        .field("b", Schema::number())
        .field("c", Schema::boolean());

    let errors = unwrap_failure(schema.validate(
        &json!({ "c": "x", "b": "y", "a": 1 }),
        &IssuePath::root(),
    ));
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["a", "b", "c"]);
}

#[test]
fn test_unknown_keys_stripped_by_default() {
    let schema = Schema::object().field("a", Schema::number());

    let output = schema.parse(&json!({ "a": 1, "b": 2 })).unwrap();
    assert_eq!(serde_json::Value::Object(output), json!({ "a": 1 }));
}

#[test]
fn test_passthrough_keeps_unknown_keys() {
    let schema = Schema::object().field("a", Schema::number()).passthrough();

    let output = schema.parse(&json!({ "a": 1, "b": [true] })).unwrap();
    assert_eq!(serde_json::Value::Object(output), json!({ "a": 1, "b": [true] }));
}

#[test]
fn test_strict_reports_unknown_keys_once() {
    let schema = Schema::object().field("a", Schema::number()).strict();

    let errors = unwrap_failure(schema.validate(
        &json!({ "a": 1, "x": 1, "y": 2 }),
        &IssuePath::root(),
    ));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, IssueCode::UnrecognizedKeys);
    assert_eq!(errors.first().message, "Unrecognized key(s) in object: 'x', 'y'");
}

#[test]
fn test_catchall_validates_unknown_keys() {
    let schema = Schema::object().catchall(Schema::string().url());

    assert!(schema
        .safe_parse(&json!({ "mainnet": "https://rpc.example.com" }))
        .is_success());

    let errors = unwrap_failure(schema.validate(&json!({ "sepolia": "nope" }), &IssuePath::root()));
    assert_eq!(errors.first().path.to_string(), "sepolia");
    assert_eq!(errors.first().message, "Invalid url");
}

#[test]
fn test_non_object_produces_invalid_type() {
    let schema = Schema::object();

    for (value, received) in [(json!([]), "array"), (json!(null), "null"), (json!("{}"), "string")] {
        let errors = unwrap_failure(schema.validate(&value, &IssuePath::root()));
        assert_eq!(errors.first().message, format!("Expected object, received {received}"));
    }
}

#[test]
fn test_incompatible_field_only_fails_when_present() {
    let schema = Schema::object()
        .field("url", Schema::string())
        .optional(
            "forking",
            Schema::incompatible_field("This field is only valid for the hardhat network"),
        );

    assert!(schema.safe_parse(&json!({ "url": "http://x.io" })).is_success());

    let errors = unwrap_failure(schema.validate(
        &json!({ "url": "http://x.io", "forking": {} }),
        &IssuePath::root(),
    ));
    assert_eq!(errors.first().path.to_string(), "forking");
    assert_eq!(
        errors.first().message,
        "This field is only valid for the hardhat network"
    );
}

#[test]
fn test_enum_and_literal_fields() {
    let schema = Schema::object()
        .field("type", Schema::literal("http"))
        .field("mode", Schema::enumeration(["auto", "manual"]));

    assert!(schema.safe_parse(&json!({ "type": "http", "mode": "auto" })).is_success());

    let errors = unwrap_failure(schema.validate(
        &json!({ "type": "edr", "mode": "interval" }),
        &IssuePath::root(),
    ));
    assert_eq!(errors.first().code, IssueCode::InvalidLiteral);
    assert_eq!(errors.first().message, "Invalid literal value, expected \"http\"");
    assert_eq!(errors.iter().nth(1).unwrap().code, IssueCode::InvalidEnumValue);
    assert_eq!(
        errors.iter().nth(1).unwrap().message,
        "Invalid enum value. Expected 'auto' | 'manual', received 'interval'"
    );
}

#[test]
fn test_declares() {
    let schema = Schema::object().field("a", Schema::number()).optional("b", Schema::string());
    assert!(schema.declares("a"));
    assert!(schema.declares("b"));
    assert!(!schema.declares("c"));
}
