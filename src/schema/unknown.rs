//! Schemas at the two extremes: accept anything, accept nothing.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::traits::{received_type, SchemaLike};

/// Accepts any value unchanged.
#[derive(Clone, Default)]
pub struct UnknownSchema;

impl UnknownSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for UnknownSchema {
    type Output = Value;

    fn validate(&self, value: &Value, _path: &IssuePath) -> Validation<Value, Issues> {
        Validation::Success(value.clone())
    }

    fn validate_to_value(&self, value: &Value, _path: &IssuePath) -> Validation<Value, Issues> {
        Validation::Success(value.clone())
    }
}

/// Rejects every value with a fixed message.
///
/// Used through [`Schema::incompatible_field`](crate::Schema::incompatible_field)
/// as an optional object field: absence passes, any present value fails.
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let network = Schema::object()
///     .field("type", Schema::literal("http"))
///     .optional("chainType", Schema::incompatible_field("chainType is only valid for edr networks"));
///
/// assert!(network.safe_parse(&json!({ "type": "http" })).is_success());
///
/// let issues = network.parse(&json!({ "type": "http", "chainType": "l1" })).unwrap_err();
/// assert_eq!(issues.first().message, "chainType is only valid for edr networks");
/// assert_eq!(issues.first().path.to_string(), "chainType");
/// ```
#[derive(Clone)]
pub struct IncompatibleFieldSchema {
    message: String,
}

impl IncompatibleFieldSchema {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl SchemaLike for IncompatibleFieldSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        Validation::Failure(Issues::single(
            Issue::new(path.clone(), self.message.clone())
                .with_code(IssueCode::InvalidType)
                .with_expected("never")
                .with_received(received_type(value)),
        ))
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        SchemaLike::validate(self, value, path)
    }
}
