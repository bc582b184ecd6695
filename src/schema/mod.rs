//! Schema definitions for validation.
//!
//! Primitive schemas (string, number, boolean, literal, enum, array, object,
//! unknown) compose into config schemas; the union combinators choose between
//! alternative shapes with a single readable failure message.
//!
//! # Example
//!
//! ```rust
//! use hardhat_schema::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let schema = Schema::object().field("bar", Schema::array(Schema::number()));
//!
//! let issues = schema.parse(&json!({ "bar": ["asd"] })).unwrap_err();
//! assert_eq!(issues.first().path.to_json(), json!(["bar", 0]));
//! ```

mod array;
mod literal;
mod number;
mod object;
mod predicate;
mod string;
mod traits;
mod union;
mod unknown;

use std::sync::Arc;

use serde_json::Value;

use crate::error::SchemaBuildError;

pub use array::ArraySchema;
pub use literal::{BooleanSchema, EnumSchema, LiteralSchema};
pub use number::NumberSchema;
pub use object::ObjectSchema;
pub use predicate::{is_array, is_boolean, is_number, is_object, is_string};
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueSchema};
pub use union::{
    candidate, when, ConditionalCandidate, ConditionalUnionSchema, Predicate, UnionSchema,
};
pub use unknown::{IncompatibleFieldSchema, UnknownSchema};

pub(crate) use traits::received_type;

/// Entry point for creating validation schemas.
///
/// Every constructor returns a builder; constraints are added with chained
/// methods.
pub struct Schema;

impl Schema {
    /// A string schema. See [`StringSchema`].
    ///
    /// ```rust
    /// use hardhat_schema::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(1);
    /// assert!(schema.safe_parse(&json!("spec")).is_success());
    /// assert!(schema.safe_parse(&json!("")).is_failure());
    /// ```
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// A number schema. See [`NumberSchema`].
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// A schema accepting exactly `value`.
    pub fn literal(value: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// A schema accepting one of `options`.
    pub fn enumeration<I, S>(options: I) -> EnumSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumSchema::new(options)
    }

    /// An array whose items all match `item_schema`.
    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }

    /// An object schema. See [`ObjectSchema`].
    ///
    /// ```rust
    /// use hardhat_schema::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string())
    ///     .optional("bail", Schema::boolean());
    ///
    /// assert!(schema.safe_parse(&json!({ "name": "x" })).is_success());
    /// assert!(schema.safe_parse(&json!({ "bail": true })).is_failure());
    /// ```
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Accepts any value.
    pub fn unknown() -> UnknownSchema {
        UnknownSchema::new()
    }

    /// Rejects any value with `message`. Declare it with
    /// [`ObjectSchema::optional`] so only a present value fails.
    pub fn incompatible_field(message: impl Into<String>) -> IncompatibleFieldSchema {
        IncompatibleFieldSchema::new(message)
    }

    /// Tries every candidate; reports `message` alone if none accepts the value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::EmptyCandidates` if `candidates` is empty.
    ///
    /// ```rust
    /// use hardhat_schema::schema::candidate;
    /// use hardhat_schema::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::union(
    ///     vec![candidate(Schema::string()), candidate(Schema::number())],
    ///     "bad",
    /// )
    /// .unwrap();
    ///
    /// let issues = schema.parse(&json!(true)).unwrap_err();
    /// assert_eq!(issues.len(), 1);
    /// assert_eq!(issues.first().message, "bad");
    /// assert!(issues.first().path.is_root());
    /// ```
    pub fn union(
        candidates: Vec<Arc<dyn ValueSchema>>,
        message: impl Into<String>,
    ) -> Result<UnionSchema, SchemaBuildError> {
        UnionSchema::new(candidates, message)
    }

    /// Delegates to the first candidate whose predicate matches; reports
    /// `message` if none does.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::EmptyCandidates` if `candidates` is empty.
    pub fn conditional_union(
        candidates: Vec<ConditionalCandidate>,
        message: impl Into<String>,
    ) -> Result<ConditionalUnionSchema, SchemaBuildError> {
        ConditionalUnionSchema::new(candidates, message)
    }
}
