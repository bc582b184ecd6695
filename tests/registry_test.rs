//! Integration tests for the plugin validator registry.

use hardhat_schema::config::{mocha_config_schema, sensitive_url_schema};
use hardhat_schema::{format_config_errors, PathKey, PluginValidatorRegistry, RegistryError, Schema};
use serde_json::json;

#[test]
fn test_register_and_get() {
    let registry = PluginValidatorRegistry::new();
    registry
        .register("hardhat-mocha", "mocha", mocha_config_schema().unwrap())
        .unwrap();

    assert!(registry.get("hardhat-mocha").is_some());
    assert!(registry.get("hardhat-ethers").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = PluginValidatorRegistry::new();
    registry.register("p", "a", Schema::string()).unwrap();

    let result = registry.register("p", "a", Schema::string());
    assert!(matches!(result, Err(RegistryError::DuplicatePlugin(ref id)) if id == "p"));
}

#[test]
fn test_plugins_listed_in_registration_order() {
    let registry = PluginValidatorRegistry::new();
    registry.register("z-plugin", "z", Schema::unknown()).unwrap();
    registry.register("a-plugin", "a", Schema::unknown()).unwrap();

    assert_eq!(registry.plugins(), vec!["z-plugin", "a-plugin"]);
}

#[test]
fn test_valid_config_has_no_errors() {
    let registry = PluginValidatorRegistry::new();
    registry
        .register("hardhat-mocha", "mocha", mocha_config_schema().unwrap())
        .unwrap();

    let config = json!({ "mocha": { "timeout": "10s", "ui": "tdd" }, "solidity": "0.8.24" });
    assert!(registry.validate(&config).is_empty());
}

#[test]
fn test_errors_concatenated_across_plugins() {
    let registry = PluginValidatorRegistry::new();
    registry
        .register("hardhat-mocha", "mocha", mocha_config_schema().unwrap())
        .unwrap();
    registry
        .register("rpc", "rpcUrl", sensitive_url_schema().unwrap())
        .unwrap();

    let errors = registry.validate(&json!({
        "mocha": { "timeout": false },
        "rpcUrl": "asd"
    }));

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].path, vec![PathKey::key("mocha"), PathKey::key("timeout")]);
    assert_eq!(errors[0].message, "Expected a number or a string");
    assert_eq!(errors[1].path, vec![PathKey::key("rpcUrl")]);
    assert_eq!(errors[1].message, "Invalid url");

    assert_eq!(
        format_config_errors(&errors),
        "\t* Config error in config.mocha.timeout: Expected a number or a string\n\
         \t* Config error in config.rpcUrl: Invalid url"
    );
}

#[test]
fn test_required_key_missing() {
    let registry = PluginValidatorRegistry::new();
    registry
        .register_required("solidity", "solidity", Schema::string())
        .unwrap();

    let errors = registry.validate(&json!({}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Required");
    assert_eq!(errors[0].path, vec![PathKey::key("solidity")]);
}

#[test]
fn test_non_object_config() {
    let registry = PluginValidatorRegistry::new();
    registry.register("p", "a", Schema::string()).unwrap();

    let errors = registry.validate(&json!([1, 2]));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].path.is_empty());
    assert_eq!(errors[0].to_string(), "Config error in config: Expected object, received array");
}

#[test]
fn test_registry_clone_shares_validators() {
    let registry = PluginValidatorRegistry::new();
    let cloned = registry.clone();

    registry.register("p", "a", Schema::string()).unwrap();
    assert_eq!(cloned.len(), 1);
    assert!(!cloned.validate(&json!({ "a": 1 })).is_empty());
}

#[test]
fn test_default_registry() {
    let registry = PluginValidatorRegistry::default();
    assert!(registry.is_empty());
    assert!(registry.validate(&json!({ "anything": true })).is_empty());
}
