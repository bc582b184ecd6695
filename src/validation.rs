//! User-config validation entry points.
//!
//! Config validation reports plain `{ path, message }` pairs rather than full
//! [`Issue`](crate::Issue) values; this is what config hooks hand back to the
//! host so it can print them.

use std::fmt::{self, Display};

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::Issues;
use crate::path::{IssuePath, PathKey};
use crate::schema::SchemaLike;

/// One problem found in a user config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub path: Vec<PathKey>,
    pub message: String,
}

impl ConfigValidationError {
    pub fn new(path: Vec<PathKey>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = IssuePath::from_keys(self.path.iter().cloned());
        if path.is_root() {
            write!(f, "Config error in config: {}", self.message)
        } else {
            write!(f, "Config error in config.{}: {}", path, self.message)
        }
    }
}

/// Flattens validation issues into config errors, preserving order.
pub fn issues_to_config_errors(issues: Issues) -> Vec<ConfigValidationError> {
    issues
        .into_iter()
        .map(|issue| ConfigValidationError {
            path: issue.path.into_keys(),
            message: issue.message,
        })
        .collect()
}

/// Validates a user config value, returning every problem found.
///
/// An empty vec means the config is valid.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{validate_user_config, PathKey, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object().optional("mocha", Schema::object().optional("bail", Schema::boolean()));
///
/// assert!(validate_user_config(&json!({ "mocha": { "bail": true } }), &schema).is_empty());
///
/// let errors = validate_user_config(&json!({ "mocha": { "bail": "yes" } }), &schema);
/// assert_eq!(errors[0].path, vec![PathKey::key("mocha"), PathKey::key("bail")]);
/// assert_eq!(errors[0].message, "Expected boolean, received string");
/// ```
pub fn validate_user_config<S>(config: &Value, schema: &S) -> Vec<ConfigValidationError>
where
    S: SchemaLike + ?Sized,
{
    match schema.safe_parse(config) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(issues) => issues_to_config_errors(issues),
    }
}

/// Renders config errors one per line, in the form printed by the host.
pub fn format_config_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("\t* {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Converts a validation result to the `{ success, data }` /
/// `{ success: false, error: { issues } }` JSON shape.
pub fn outcome_to_json(result: &Validation<Value, Issues>) -> Value {
    match result {
        Validation::Success(data) => json!({ "success": true, "data": data }),
        Validation::Failure(issues) => json!({ "success": false, "error": issues.to_json() }),
    }
}
