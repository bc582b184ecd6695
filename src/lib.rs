//! # hardhat-schema
//!
//! Config validation for Hardhat plugins.
//!
//! ## Overview
//!
//! Plugins describe the shape of their user config section with composable
//! schemas and register them with a [`PluginValidatorRegistry`]. Validation
//! collects every issue it finds, each with the path of the offending value,
//! using stillwater's `Validation` for error accumulation.
//!
//! Two combinators handle values that may take several shapes:
//!
//! - [`UnionSchema`] accepts a value if any candidate does, and reports a
//!   single plugin-authored message otherwise;
//! - [`ConditionalUnionSchema`] picks the first candidate whose predicate
//!   matches the raw input and reports exactly what that candidate reports.
//!
//! ## Core Types
//!
//! - [`IssuePath`]: location of a value inside the config (e.g. `networks.hardhat.accounts[0]`)
//! - [`Issue`] / [`Issues`]: validation failures with path, message and code
//! - [`Schema`]: entry point for creating schemas
//! - [`ConfigValidationError`]: the `{ path, message }` shape reported to the user
//!
//! ## Example
//!
//! ```rust
//! use hardhat_schema::schema::{is_object, is_string, when};
//! use hardhat_schema::{validate_user_config, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object().optional(
//!     "foo",
//!     Schema::conditional_union(
//!         vec![
//!             when(is_string, Schema::string()),
//!             when(is_object, Schema::object().field("bar", Schema::number())),
//!         ],
//!         "Expected a string or an object with bar",
//!     )
//!     .unwrap(),
//! );
//!
//! assert!(validate_user_config(&json!({ "foo": "x" }), &schema).is_empty());
//!
//! let errors = validate_user_config(&json!({ "foo": 1 }), &schema);
//! assert_eq!(errors[0].message, "Expected a string or an object with bar");
//! ```

pub mod config;
pub mod error;
pub mod keystore;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;

pub use error::{Issue, IssueCode, Issues, SchemaBuildError};
pub use path::{IssuePath, PathKey};
pub use registry::{PluginValidatorRegistry, RegistryError};
pub use schema::{
    ArraySchema, BooleanSchema, ConditionalCandidate, ConditionalUnionSchema, EnumSchema,
    IncompatibleFieldSchema, LiteralSchema, NumberSchema, ObjectSchema, Schema, SchemaLike,
    StringSchema, UnionSchema, UnknownSchema, ValueSchema,
};
pub use validation::{
    format_config_errors, outcome_to_json, validate_user_config, ConfigValidationError,
};

/// Type alias for validation results using [`Issues`].
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;
