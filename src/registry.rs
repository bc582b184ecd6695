//! Per-plugin config validator registry.
//!
//! Each plugin owns one top-level key of the user config and registers the
//! schema for it. [`PluginValidatorRegistry::validate`] runs every registered
//! validator and concatenates their errors in registration order.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use stillwater::Validation;
use tracing::debug;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;
use crate::schema::{received_type, SchemaLike, ValueSchema};
use crate::validation::{issues_to_config_errors, ConfigValidationError};

struct PluginValidator {
    key: String,
    schema: Arc<dyn ValueSchema>,
    required: bool,
}

type ValidatorMap = Arc<RwLock<IndexMap<String, PluginValidator>>>;

/// A thread-safe registry of config validators keyed by plugin id.
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{PluginValidatorRegistry, Schema};
/// use serde_json::json;
///
/// let registry = PluginValidatorRegistry::new();
/// registry
///     .register("hardhat-mocha", "mocha", Schema::object().optional("bail", Schema::boolean()))
///     .unwrap();
///
/// let errors = registry.validate(&json!({ "mocha": { "bail": 1 } }));
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].to_string(), "Config error in config.mocha.bail: Expected boolean, received number");
/// ```
#[derive(Clone, Default)]
pub struct PluginValidatorRegistry {
    validators: ValidatorMap,
}

impl PluginValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` for the optional config key `key`, owned by `plugin_id`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicatePlugin` if `plugin_id` is already registered.
    pub fn register<S>(
        &self,
        plugin_id: impl Into<String>,
        key: impl Into<String>,
        schema: S,
    ) -> Result<(), RegistryError>
    where
        S: SchemaLike + 'static,
    {
        self.insert(plugin_id.into(), key.into(), Arc::new(schema), false)
    }

    /// Like [`register`](Self::register), but a config without `key` is an error.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicatePlugin` if `plugin_id` is already registered.
    pub fn register_required<S>(
        &self,
        plugin_id: impl Into<String>,
        key: impl Into<String>,
        schema: S,
    ) -> Result<(), RegistryError>
    where
        S: SchemaLike + 'static,
    {
        self.insert(plugin_id.into(), key.into(), Arc::new(schema), true)
    }

    fn insert(
        &self,
        plugin_id: String,
        key: String,
        schema: Arc<dyn ValueSchema>,
        required: bool,
    ) -> Result<(), RegistryError> {
        let mut validators = self.validators.write();

        if validators.contains_key(&plugin_id) {
            return Err(RegistryError::DuplicatePlugin(plugin_id));
        }

        debug!(plugin = %plugin_id, key = %key, required, "registered config validator");
        validators.insert(
            plugin_id,
            PluginValidator {
                key,
                schema,
                required,
            },
        );
        Ok(())
    }

    /// Returns the schema registered by `plugin_id`.
    pub fn get(&self, plugin_id: &str) -> Option<Arc<dyn ValueSchema>> {
        self.validators
            .read()
            .get(plugin_id)
            .map(|v| Arc::clone(&v.schema))
    }

    /// Returns the registered plugin ids in registration order.
    pub fn plugins(&self) -> Vec<String> {
        self.validators.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Validates a user config against every registered validator.
    ///
    /// A non-object config yields a single root error. Otherwise each
    /// validator checks its key; issue paths start with that key.
    pub fn validate(&self, user_config: &Value) -> Vec<ConfigValidationError> {
        let Some(config) = user_config.as_object() else {
            let issue = Issue::invalid_type(IssuePath::root(), "object", received_type(user_config));
            return issues_to_config_errors(Issues::single(issue));
        };

        let validators = self.validators.read();
        let mut errors = Vec::new();

        for (plugin_id, validator) in validators.iter() {
            let result = match config.get(&validator.key) {
                Some(value) => validator.schema.validate_value(value, &IssuePath::root()),
                None if validator.required => {
                    Validation::Failure(Issues::single(Issue::required(IssuePath::root())))
                }
                None => continue,
            };

            if let Validation::Failure(issues) = result {
                let issues = issues.prefixed(&IssuePath::root().push_key(&validator.key));
                debug!(plugin = %plugin_id, issues = issues.len(), "plugin config validation failed");
                errors.extend(issues_to_config_errors(issues));
            }
        }

        errors
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("plugin '{0}' already registered a config validator")]
    DuplicatePlugin(String),
}
