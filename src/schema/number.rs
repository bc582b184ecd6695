//! Number schema validation.
//!
//! This module provides [`NumberSchema`] for validating JSON numbers with
//! integer, bound and sign constraints.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, Issues};
use crate::path::IssuePath;

use super::traits::{received_type, SchemaLike};

/// A constraint applied to number values.
#[derive(Clone)]
enum NumberConstraint {
    Min {
        value: f64,
        inclusive: bool,
        message: Option<String>,
    },
    Max {
        value: f64,
        inclusive: bool,
        message: Option<String>,
    },
}

/// A schema for validating JSON numbers.
///
/// Accepts both integers and floats unless [`NumberSchema::int`] is set.
/// The validated value is the input number unchanged, so `40000` stays an
/// integer in the output.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let retries = Schema::number().int().non_negative();
///
/// assert!(retries.safe_parse(&json!(3)).is_success());
///
/// let issues = retries.parse(&json!(-1)).unwrap_err();
/// assert_eq!(issues.first().message, "Number must be greater than or equal to 0");
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    integer: bool,
    type_error_message: Option<String>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            integer: false,
            type_error_message: None,
        }
    }

    /// Rejects numbers with a fractional part.
    pub fn int(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            inclusive: true,
            message: None,
        });
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            inclusive: true,
            message: None,
        });
        self
    }

    /// Requires a value greater than 0.
    pub fn positive(mut self) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value: 0.0,
            inclusive: false,
            message: None,
        });
        self
    }

    /// Requires a value greater than or equal to 0.
    pub fn non_negative(self) -> Self {
        self.min(0.0)
    }

    /// Sets a custom message for the most recent constraint, or for the type
    /// check when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(NumberConstraint::Min { message: m, .. })
            | Some(NumberConstraint::Max { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &IssuePath) -> Validation<f64, Issues> {
        let n = match value.as_f64() {
            Some(n) => n,
            None => {
                let mut issue = Issue::invalid_type(path.clone(), "number", received_type(value));
                if let Some(message) = &self.type_error_message {
                    issue.message = message.clone();
                }
                return Validation::Failure(Issues::single(issue));
            }
        };

        if self.integer && n.fract() != 0.0 {
            return Validation::Failure(Issues::single(Issue::invalid_type(
                path.clone(),
                "integer",
                "float",
            )));
        }

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, n, path))
            .collect();

        match Issues::try_from_vec(issues) {
            None => Validation::Success(n),
            Some(issues) => Validation::Failure(issues),
        }
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<f64, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate(value, path).map(|_| value.clone())
    }
}

fn check_constraint(constraint: &NumberConstraint, n: f64, path: &IssuePath) -> Option<Issue> {
    match constraint {
        NumberConstraint::Min {
            value,
            inclusive,
            message,
        } => {
            let violated = if *inclusive { n < *value } else { n <= *value };
            violated.then(|| {
                let relation = if *inclusive {
                    "greater than or equal to"
                } else {
                    "greater than"
                };
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("Number must be {} {}", relation, value));
                Issue::new(path.clone(), msg)
                    .with_code(IssueCode::TooSmall)
                    .with_expected(format!("{} {}", relation, value))
                    .with_received(n.to_string())
            })
        }
        NumberConstraint::Max {
            value,
            inclusive,
            message,
        } => {
            let violated = if *inclusive { n > *value } else { n >= *value };
            violated.then(|| {
                let relation = if *inclusive {
                    "less than or equal to"
                } else {
                    "less than"
                };
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("Number must be {} {}", relation, value));
                Issue::new(path.clone(), msg)
                    .with_code(IssueCode::TooBig)
                    .with_expected(format!("{} {}", relation, value))
                    .with_received(n.to_string())
            })
        }
    }
}
