//! Validation issue types.
//!
//! This module provides [`Issue`] for a single validation failure and
//! [`Issues`] for the non-empty list a failed validation returns.

use std::fmt::{self, Display};

use serde_json::{json, Value};
use stillwater::prelude::*;

use crate::path::IssuePath;

/// Machine-readable category of an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// The value has the wrong JSON type, or a required field is missing.
    InvalidType,
    /// The value differs from the expected literal.
    InvalidLiteral,
    /// A string is not one of the allowed options.
    InvalidEnumValue,
    /// A string failed a format check (url, pattern).
    InvalidString,
    /// A length or numeric lower bound was violated.
    TooSmall,
    /// A length or numeric upper bound was violated.
    TooBig,
    /// A strict object received keys it does not declare.
    UnrecognizedKeys,
    /// A caller-supplied message, used by the union combinators.
    Custom,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::InvalidLiteral => "invalid_literal",
            IssueCode::InvalidEnumValue => "invalid_enum_value",
            IssueCode::InvalidString => "invalid_string",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::Custom => "custom",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure.
///
/// # Example
///
/// ```rust
/// use hardhat_schema::{Issue, IssueCode, IssuePath};
///
/// let issue = Issue::new(IssuePath::root().push_key("foo"), "Invalid url")
///     .with_code(IssueCode::InvalidString)
///     .with_received("asd");
///
/// assert_eq!(issue.to_string(), "foo: Invalid url (received: asd)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Where the failing value sits inside the validated input.
    pub path: IssuePath,
    /// Human-readable message.
    pub message: String,
    pub code: IssueCode,
    /// What was expected, when the check has a natural description.
    pub expected: Option<String>,
    /// What was found instead.
    pub received: Option<String>,
}

impl Issue {
    /// Creates an issue with code [`IssueCode::Custom`].
    pub fn new(path: IssuePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: IssueCode::Custom,
            expected: None,
            received: None,
        }
    }

    /// Creates the standard wrong-type issue, e.g. `Expected string, received number`.
    pub fn invalid_type(path: IssuePath, expected: &str, received: &str) -> Self {
        Self::new(path, format!("Expected {}, received {}", expected, received))
            .with_code(IssueCode::InvalidType)
            .with_expected(expected)
            .with_received(received)
    }

    /// Creates the issue reported for a required field that is absent.
    pub fn required(path: IssuePath) -> Self {
        Self::new(path, "Required")
            .with_code(IssueCode::InvalidType)
            .with_received("undefined")
    }

    pub fn with_code(mut self, code: IssueCode) -> Self {
        self.code = code;
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.received = Some(received.into());
        self
    }

    /// Returns `{ "message": ..., "path": [...] }`.
    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message,
            "path": self.path.to_json(),
        })
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref received) = self.received {
            write!(f, " (received: {})", received)?;
        }

        Ok(())
    }
}

impl std::error::Error for Issue {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty, ordered list of validation issues.
///
/// Wraps `NonEmptyVec<Issue>` so a `Validation::Failure` always carries at
/// least one issue. Sibling failures are merged with `Semigroup::combine`:
///
/// ```rust
/// use hardhat_schema::{Issue, IssuePath, Issues};
/// use stillwater::prelude::*;
///
/// let timeout = Issues::single(Issue::new(IssuePath::from_keys(["timeout"]), "bad timeout"));
/// let ui = Issues::single(Issue::new(IssuePath::from_keys(["ui"]), "bad ui"));
///
/// let combined = timeout.combine(ui);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates `Issues` from a vec known to be non-empty.
    ///
    /// # Panics
    ///
    /// Panics if `issues` is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Self {
        Self(NonEmptyVec::from_vec(issues).expect("Issues requires at least one issue"))
    }

    /// Returns `None` for an empty vec instead of panicking.
    pub fn try_from_vec(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self::from_vec(issues))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Returns the issues located exactly at `path`.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    pub fn with_code(&self, code: IssueCode) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    /// Returns the messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|i| i.message.as_str()).collect()
    }

    /// Returns a copy with every path prefixed by `prefix`.
    pub fn prefixed(self, prefix: &IssuePath) -> Self {
        Self::from_vec(
            self.into_iter()
                .map(|mut issue| {
                    issue.path = issue.path.prefixed(prefix);
                    issue
                })
                .collect(),
        )
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }

    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Issue> {
        &self.0
    }

    /// Returns `{ "issues": [{ "message": ..., "path": [...] }, ...] }`.
    pub fn to_json(&self) -> Value {
        json!({
            "issues": self.0.iter().map(Issue::to_json).collect::<Vec<_>>(),
        })
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
