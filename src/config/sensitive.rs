//! Sensitive config values: plain strings or configuration variables.

use serde_json::{json, Value};

use crate::error::SchemaBuildError;
use crate::schema::{
    candidate, is_object, is_string, when, ConditionalUnionSchema, ObjectSchema, Schema,
    UnionSchema,
};

/// The `_type` tag carried by configuration variables.
pub const CONFIGURATION_VARIABLE_TYPE: &str = "ConfigurationVariable";

/// A named placeholder for a secret, resolved at runtime.
///
/// JSON form: `{ "_type": "ConfigurationVariable", "name": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigurationVariable {
    pub name: String,
}

impl ConfigurationVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Reads a configuration variable from its JSON form.
    ///
    /// Returns `None` unless `_type` is the configuration variable tag and
    /// `name` is a string.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.get("_type")?.as_str()? != CONFIGURATION_VARIABLE_TYPE {
            return None;
        }
        let name = obj.get("name")?.as_str()?;
        Some(Self::new(name))
    }

    pub fn to_value(&self) -> Value {
        json!({ "_type": CONFIGURATION_VARIABLE_TYPE, "name": self.name })
    }
}

/// A validated sensitive value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensitiveValue {
    Plain(String),
    Variable(ConfigurationVariable),
}

impl SensitiveValue {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(SensitiveValue::Plain(s.clone())),
            other => ConfigurationVariable::from_value(other).map(SensitiveValue::Variable),
        }
    }
}

/// Schema for the JSON form of a [`ConfigurationVariable`].
pub fn configuration_variable_schema() -> ObjectSchema {
    Schema::object()
        .field("_type", Schema::literal(CONFIGURATION_VARIABLE_TYPE))
        .field("name", Schema::string())
}

/// A plain string or a configuration variable.
pub fn sensitive_string_schema() -> Result<UnionSchema, SchemaBuildError> {
    Schema::union(
        vec![
            candidate(Schema::string()),
            candidate(configuration_variable_schema()),
        ],
        "Expected a string or a Configuration Variable",
    )
}

/// A URL string or a configuration variable.
///
/// Strings are checked as URLs and objects as configuration variables, so a
/// malformed URL reports `Invalid url` instead of the fallback message.
///
/// ```rust
/// use hardhat_schema::config::sensitive_url_schema;
/// use hardhat_schema::SchemaLike;
/// use serde_json::json;
///
/// let schema = sensitive_url_schema().unwrap();
///
/// assert!(schema.safe_parse(&json!("https://rpc.example.com")).is_success());
/// assert!(schema
///     .safe_parse(&json!({ "_type": "ConfigurationVariable", "name": "RPC_URL" }))
///     .is_success());
///
/// assert_eq!(schema.parse(&json!("asd")).unwrap_err().first().message, "Invalid url");
/// assert_eq!(
///     schema.parse(&json!(8545)).unwrap_err().first().message,
///     "Expected a URL or a Configuration Variable"
/// );
/// ```
pub fn sensitive_url_schema() -> Result<ConditionalUnionSchema, SchemaBuildError> {
    Schema::conditional_union(
        vec![
            when(is_string, Schema::string().url()),
            when(is_object, configuration_variable_schema()),
        ],
        "Expected a URL or a Configuration Variable",
    )
}
