//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays whose items all
//! share one schema.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::traits::{received_type, SchemaLike};

enum LengthBound {
    Min { min: usize, message: Option<String> },
    Max { max: usize, message: Option<String> },
}

/// A schema for validating arrays.
///
/// Each item is validated at `path + [index]`; issues from every failing
/// item and every violated length bound are reported together.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let globals = Schema::array(Schema::string());
///
/// let issues = globals.parse(&json!(["ok", 1])).unwrap_err();
/// assert_eq!(issues.first().path.to_string(), "[1]");
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
    bounds: Vec<LengthBound>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            bounds: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.bounds.push(LengthBound::Min { min, message: None });
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.bounds.push(LengthBound::Max { max, message: None });
        self
    }

    /// Shorthand for `min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom message for the most recent bound, or for the type check
    /// when no bound has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.bounds.last_mut() {
            Some(LengthBound::Min { message: m, .. }) | Some(LengthBound::Max { message: m, .. }) => {
                *m = Some(message.into())
            }
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Vec<Value>, Issues> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                let mut issue = Issue::invalid_type(path.clone(), "array", received_type(value));
                if let Some(message) = &self.type_error_message {
                    issue.message = message.clone();
                }
                return Validation::Failure(Issues::single(issue));
            }
        };

        let mut issues = Vec::new();

        for bound in &self.bounds {
            match bound {
                LengthBound::Min { min, message } if arr.len() < *min => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("Array must contain at least {} element(s)", min)
                    });
                    issues.push(
                        Issue::new(path.clone(), msg)
                            .with_code(IssueCode::TooSmall)
                            .with_expected(format!("at least {} items", min))
                            .with_received(format!("{} items", arr.len())),
                    );
                }
                LengthBound::Max { max, message } if arr.len() > *max => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("Array must contain at most {} element(s)", max)
                    });
                    issues.push(
                        Issue::new(path.clone(), msg)
                            .with_code(IssueCode::TooBig)
                            .with_expected(format!("at most {} items", max))
                            .with_received(format!("{} items", arr.len())),
                    );
                }
                _ => {}
            }
        }

        let mut validated = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            match self.item_schema.validate_to_value(item, &path.push_index(index)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => issues.extend(e),
            }
        }

        match Issues::try_from_vec(issues) {
            None => Validation::Success(validated),
            Some(issues) => Validation::Failure(issues),
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Vec<Value>, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::Array)
    }
}
