//! Integration tests for IssuePath.

use hardhat_schema::{IssuePath, PathKey};
use serde_json::json;

#[test]
fn test_path_construction_and_display() {
    // Root path
    assert_eq!(IssuePath::root().to_string(), "");

    // Simple key
    assert_eq!(IssuePath::root().push_key("mocha").to_string(), "mocha");

    // Simple index
    assert_eq!(IssuePath::root().push_index(0).to_string(), "[0]");

    // Complex nested path
    let path = IssuePath::root()
        .push_key("networks")
        .push_key("hardhat")
        .push_key("accounts")
        .push_index(2);
    assert_eq!(path.to_string(), "networks.hardhat.accounts[2]");
}

#[test]
fn test_path_keys_preserved() {
    let path = IssuePath::root().push_key("bar").push_index(0).push_key("value");

    let keys = path.keys();
    assert_eq!(keys.len(), 3);

    match &keys[0] {
        PathKey::Key(name) => assert_eq!(name, "bar"),
        _ => panic!("Expected Key step"),
    }

    match &keys[1] {
        PathKey::Index(idx) => assert_eq!(*idx, 0),
        _ => panic!("Expected Index step"),
    }
}

#[test]
fn test_path_to_json_mixes_strings_and_numbers() {
    let path = IssuePath::from_keys([PathKey::key("bar"), PathKey::index(0)]);
    assert_eq!(path.to_json(), json!(["bar", 0]));
}

#[test]
fn test_prefixed_puts_prefix_first() {
    let inner = IssuePath::root().push_key("timeout");
    let prefix = IssuePath::root().push_key("mocha");

    let full = inner.prefixed(&prefix);
    assert_eq!(full.to_string(), "mocha.timeout");
    assert_eq!(inner.to_string(), "timeout");
}

#[test]
fn test_parent_and_last() {
    let path = IssuePath::from_keys(["a", "b"]).push_index(3);

    assert_eq!(path.last(), Some(&PathKey::index(3)));
    assert_eq!(path.parent().unwrap().to_string(), "a.b");
    assert!(IssuePath::root().parent().is_none());
}

#[test]
fn test_path_equality() {
    let a = IssuePath::root().push_key("foo").push_index(1);
    let b = IssuePath::from_keys([PathKey::key("foo"), PathKey::index(1)]);
    assert_eq!(a, b);
    assert_ne!(a, IssuePath::root().push_key("foo"));
}
