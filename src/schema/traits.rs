//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is the parse capability every schema implements.
//! [`ValueSchema`] erases the output type so heterogeneous schemas can sit
//! side by side in objects and union candidate lists.

use serde_json::Value;
use stillwater::Validation;

use crate::error::Issues;
use crate::path::IssuePath;

/// A schema that validates JSON values.
///
/// `validate` receives the path of the value being checked so that nested
/// schemas report issues relative to the top-level input. `safe_parse` and
/// `parse` are the top-level entry points and always start at the root path.
///
/// The `Send + Sync` bounds let a single schema instance be shared across
/// threads and stored as `Arc<dyn ValueSchema>`.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object().field("foo", Schema::string());
///
/// let result = schema.safe_parse(&json!({ "foo": 123 }));
/// let issues = result.into_result().unwrap_err();
/// assert_eq!(issues.first().message, "Expected string, received number");
/// assert_eq!(issues.first().path.to_string(), "foo");
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates `value`, which sits at `path` inside the top-level input.
    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Self::Output, Issues>;

    /// Validates `value` and returns the result as a `serde_json::Value`.
    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues>;

    /// Validates a top-level value without panicking or erroring.
    fn safe_parse(&self, value: &Value) -> Validation<Self::Output, Issues> {
        self.validate(value, &IssuePath::root())
    }

    /// Validates a top-level value, returning the issues as the error.
    fn parse(&self, value: &Value) -> Result<Self::Output, Issues> {
        self.safe_parse(value).into_result()
    }
}

/// A type-erased schema that validates to JSON values.
///
/// Any `SchemaLike` is a `ValueSchema` through the blanket impl below.
///
/// ```rust
/// use hardhat_schema::{Schema, ValueSchema};
/// use std::sync::Arc;
///
/// let candidates: Vec<Arc<dyn ValueSchema>> = vec![
///     Arc::new(Schema::string()),
///     Arc::new(Schema::number()),
/// ];
/// assert_eq!(candidates.len(), 2);
/// ```
pub trait ValueSchema: Send + Sync {
    fn validate_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues>;
}

impl<S: SchemaLike> ValueSchema for S {
    fn validate_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate_to_value(value, path)
    }
}

/// Returns the type name used in `received` positions of issue messages.
pub(crate) fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
