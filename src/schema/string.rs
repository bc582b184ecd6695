//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length bounds, regex patterns and URL format checks.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;
use url::Url;

use crate::error::{Issue, IssueCode, Issues, SchemaBuildError};
use crate::path::IssuePath;

use super::traits::{received_type, SchemaLike};

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    Url {
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// Every failing constraint is reported, not just the first one.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().url();
///
/// assert!(schema.safe_parse(&json!("http://localhost:8545")).is_success());
///
/// let issues = schema.parse(&json!("asd")).unwrap_err();
/// assert_eq!(issues.first().message, "Invalid url");
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires the string to match a regex.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::InvalidPattern` if the regex does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, SchemaBuildError> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Requires an absolute URL as parsed by the WHATWG URL standard.
    pub fn url(mut self) -> Self {
        self.constraints.push(StringConstraint::Url { message: None });
        self
    }

    /// Sets a custom message for the most recent constraint, or for the type
    /// check when no constraint has been added yet.
    ///
    /// ```rust
    /// use hardhat_schema::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(1).error("reporter cannot be empty");
    /// let issues = schema.parse(&json!("")).unwrap_err();
    /// assert_eq!(issues.first().message, "reporter cannot be empty");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Url { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &IssuePath) -> Validation<String, Issues> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let mut issue = Issue::invalid_type(path.clone(), "string", received_type(value));
                if let Some(message) = &self.type_error_message {
                    issue.message = message.clone();
                }
                return Validation::Failure(Issues::single(issue));
            }
        };

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        match Issues::try_from_vec(issues) {
            None => Validation::Success(s.to_string()),
            Some(issues) => Validation::Failure(issues),
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<String, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::String)
    }
}

fn check_constraint(constraint: &StringConstraint, value: &str, path: &IssuePath) -> Option<Issue> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("String must contain at least {} character(s)", min)
                });
                Issue::new(path.clone(), msg)
                    .with_code(IssueCode::TooSmall)
                    .with_expected(format!("at least {} characters", min))
                    .with_received(format!("{} characters", len))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("String must contain at most {} character(s)", max)
                });
                Issue::new(path.clone(), msg)
                    .with_code(IssueCode::TooBig)
                    .with_expected(format!("at most {} characters", max))
                    .with_received(format!("{} characters", len))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            Issue::new(path.clone(), message.clone().unwrap_or_else(|| "Invalid".to_string()))
                .with_code(IssueCode::InvalidString)
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_received(value.to_string())
        }),
        StringConstraint::Url { message } => (!is_url(value)).then(|| {
            Issue::new(
                path.clone(),
                message.clone().unwrap_or_else(|| "Invalid url".to_string()),
            )
            .with_code(IssueCode::InvalidString)
            .with_expected("url")
            .with_received(value.to_string())
        }),
    }
}

/// WHATWG URL parsing, the same check a JavaScript `new URL(value)` performs.
fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}
