//! Boolean, literal and enum schemas.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::traits::{received_type, SchemaLike};

/// Accepts `true` and `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema;

impl BooleanSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<bool, Issues> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => Validation::Failure(Issues::single(Issue::invalid_type(
                path.clone(),
                "boolean",
                received_type(value),
            ))),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        SchemaLike::validate(self, value, path).map(Value::Bool)
    }
}

/// Accepts exactly one JSON value.
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let bdd = Schema::literal("bdd");
/// assert!(bdd.safe_parse(&json!("bdd")).is_success());
///
/// let issues = bdd.parse(&json!("tdd")).unwrap_err();
/// assert_eq!(issues.first().message, "Invalid literal value, expected \"bdd\"");
/// ```
#[derive(Clone)]
pub struct LiteralSchema {
    expected: Value,
}

impl LiteralSchema {
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        if value == &self.expected {
            return Validation::Success(value.clone());
        }

        Validation::Failure(Issues::single(
            Issue::new(
                path.clone(),
                format!("Invalid literal value, expected {}", self.expected),
            )
            .with_code(IssueCode::InvalidLiteral)
            .with_expected(self.expected.to_string())
            .with_received(value.to_string()),
        ))
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        SchemaLike::validate(self, value, path)
    }
}

/// Accepts one of a fixed set of strings.
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let reporter = Schema::enumeration(["spec", "dot"]);
/// let issues = reporter.parse(&json!("nyan")).unwrap_err();
/// assert_eq!(
///     issues.first().message,
///     "Invalid enum value. Expected 'spec' | 'dot', received 'nyan'"
/// );
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    options: Vec<String>,
}

impl EnumSchema {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn describe_options(&self) -> String {
        self.options
            .iter()
            .map(|o| format!("'{}'", o))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl SchemaLike for EnumSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<String, Issues> {
        let Some(s) = value.as_str() else {
            return Validation::Failure(Issues::single(Issue::invalid_type(
                path.clone(),
                &self.describe_options(),
                received_type(value),
            )));
        };

        if self.options.iter().any(|o| o == s) {
            return Validation::Success(s.to_string());
        }

        Validation::Failure(Issues::single(
            Issue::new(
                path.clone(),
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    self.describe_options(),
                    s
                ),
            )
            .with_code(IssueCode::InvalidEnumValue)
            .with_expected(self.describe_options())
            .with_received(s),
        ))
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        SchemaLike::validate(self, value, path).map(Value::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean() {
        let schema = BooleanSchema::new();
        assert!(schema.safe_parse(&json!(false)).is_success());

        let issues = schema.parse(&json!("true")).unwrap_err();
        assert_eq!(issues.first().message, "Expected boolean, received string");
    }

    #[test]
    fn test_literal_matches_exactly() {
        let schema = LiteralSchema::new("ConfigurationVariable");
        assert!(schema.safe_parse(&json!("ConfigurationVariable")).is_success());

        let issues = schema.parse(&json!("configurationVariable")).unwrap_err();
        assert_eq!(issues.first().code, IssueCode::InvalidLiteral);
    }

    #[test]
    fn test_literal_non_string() {
        let schema = LiteralSchema::new(json!(42));
        assert!(schema.safe_parse(&json!(42)).is_success());
        assert!(schema.safe_parse(&json!("42")).is_failure());
    }

    #[test]
    fn test_enum_rejects_non_string() {
        let schema = EnumSchema::new(["a", "b"]);
        let issues = schema.parse(&json!(1)).unwrap_err();
        assert_eq!(issues.first().message, "Expected 'a' | 'b', received number");
    }

    #[test]
    fn test_enum_accepts_member() {
        let schema = EnumSchema::new(["bdd", "tdd"]);
        assert_eq!(schema.parse(&json!("tdd")).unwrap(), "tdd");
    }
}
