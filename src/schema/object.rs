//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects with
//! required and optional fields and a policy for undeclared keys.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::traits::{received_type, SchemaLike, ValueSchema};

#[derive(Clone)]
struct FieldDef {
    schema: Arc<dyn ValueSchema>,
    required: bool,
}

/// What happens to keys the schema does not declare.
#[derive(Clone)]
enum UnknownKeys {
    /// Drop them from the output (default).
    Strip,
    /// Copy them to the output unvalidated.
    Passthrough,
    /// Report them as an issue.
    Strict,
    /// Validate each of them against a schema.
    Catchall(Arc<dyn ValueSchema>),
}

/// A schema for validating JSON objects.
///
/// Field issues are reported at `path + [field]`, and issues from all fields
/// are accumulated.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string())
///     .optional("retries", Schema::number().int())
///     .strict();
///
/// assert!(schema.safe_parse(&json!({ "name": "mocha" })).is_success());
///
/// let issues = schema.parse(&json!({ "retries": 1.5, "extra": true })).unwrap_err();
/// assert_eq!(issues.messages(), vec![
///     "Required",
///     "Expected integer, received float",
///     "Unrecognized key(s) in object: 'extra'",
/// ]);
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    fields: IndexMap<String, FieldDef>,
    unknown_keys: UnknownKeys,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_keys: UnknownKeys::Strip,
            type_error_message: None,
        }
    }

    /// Adds a field that must be present.
    ///
    /// A missing field is reported as `Required` at the field's path.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Arc::new(schema),
                required: true,
            },
        );
        self
    }

    /// Adds a field that may be absent. If present it must pass `schema`.
    pub fn optional<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Arc::new(schema),
                required: false,
            },
        );
        self
    }

    /// Rejects undeclared keys with an `Unrecognized key(s)` issue.
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Keeps undeclared keys in the output without validating them.
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    /// Validates undeclared keys against `schema`.
    pub fn catchall<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.unknown_keys = UnknownKeys::Catchall(Arc::new(schema));
        self
    }

    /// Sets the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns true if `name` is declared on this schema.
    pub fn declares(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Map<String, Value>, Issues> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let mut issue = Issue::invalid_type(path.clone(), "object", received_type(value));
                if let Some(message) = &self.type_error_message {
                    issue.message = message.clone();
                }
                return Validation::Failure(Issues::single(issue));
            }
        };

        let mut issues = Vec::new();
        let mut validated = Map::new();

        for (name, field_def) in &self.fields {
            let field_path = path.push_key(name);

            match obj.get(name) {
                Some(field_value) => {
                    match field_def.schema.validate_value(field_value, &field_path) {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => issues.extend(e),
                    }
                }
                None if field_def.required => issues.push(Issue::required(field_path)),
                None => {}
            }
        }

        let mut unrecognized = Vec::new();
        for (key, value) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            match &self.unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    validated.insert(key.clone(), value.clone());
                }
                UnknownKeys::Strict => unrecognized.push(key.as_str()),
                UnknownKeys::Catchall(schema) => {
                    match schema.validate_value(value, &path.push_key(key)) {
                        Validation::Success(v) => {
                            validated.insert(key.clone(), v);
                        }
                        Validation::Failure(e) => issues.extend(e),
                    }
                }
            }
        }

        if !unrecognized.is_empty() {
            let keys = unrecognized
                .iter()
                .map(|k| format!("'{}'", k))
                .collect::<Vec<_>>()
                .join(", ");
            issues.push(
                Issue::new(path.clone(), format!("Unrecognized key(s) in object: {}", keys))
                    .with_code(IssueCode::UnrecognizedKeys)
                    .with_received(keys),
            );
        }

        match Issues::try_from_vec(issues) {
            None => Validation::Success(validated),
            Some(issues) => Validation::Failure(issues),
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Self::Output, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::Object)
    }
}
