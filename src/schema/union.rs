//! Union combinators with a single caller-supplied failure message.
//!
//! Two forms are provided:
//! - [`UnionSchema`]: every candidate is tried; the first success wins, and
//!   if none succeeds the candidates' issues are replaced by one fallback issue.
//! - [`ConditionalUnionSchema`]: predicates pick the candidate; the first
//!   matching candidate's result is returned as is, issues and paths included.
//!
//! # Example
//!
//! ```rust
//! use hardhat_schema::schema::{candidate, is_object, is_string, when};
//! use hardhat_schema::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let timeout = Schema::union(
//!     vec![candidate(Schema::number()), candidate(Schema::string())],
//!     "Expected a number or a string",
//! )
//! .unwrap();
//! assert!(timeout.safe_parse(&json!("2s")).is_success());
//!
//! let url = Schema::conditional_union(
//!     vec![
//!         when(is_string, Schema::string().url()),
//!         when(is_object, Schema::object().field("name", Schema::string())),
//!     ],
//!     "Expected a URL or an object",
//! )
//! .unwrap();
//! let issues = url.parse(&json!("asd")).unwrap_err();
//! assert_eq!(issues.first().message, "Invalid url");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, trace};

use crate::error::{Issue, Issues, SchemaBuildError};
use crate::path::IssuePath;

use super::traits::{SchemaLike, ValueSchema};

/// A side-effect-free test on the raw input, used to select a candidate.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Erases a schema's output type so it can be a union candidate.
pub fn candidate<S: SchemaLike + 'static>(schema: S) -> Arc<dyn ValueSchema> {
    Arc::new(schema)
}

/// Pairs a predicate with the schema to delegate to when it matches.
pub fn when<P, S>(predicate: P, schema: S) -> ConditionalCandidate
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
    S: SchemaLike + 'static,
{
    ConditionalCandidate {
        predicate: Arc::new(predicate),
        schema: Arc::new(schema),
    }
}

/// One predicate-gated candidate of a [`ConditionalUnionSchema`].
#[derive(Clone)]
pub struct ConditionalCandidate {
    predicate: Predicate,
    schema: Arc<dyn ValueSchema>,
}

impl ConditionalCandidate {
    pub fn new(predicate: Predicate, schema: Arc<dyn ValueSchema>) -> Self {
        Self { predicate, schema }
    }

    pub fn matches(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for ConditionalCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalCandidate").finish_non_exhaustive()
    }
}

/// Succeeds if any candidate accepts the value.
///
/// All candidates are evaluated in order; the output is the first success.
/// When all fail, the result is exactly one [`IssueCode::Custom`] issue with
/// the fallback message at the union's own path. Candidate issues are
/// discarded.
///
/// [`IssueCode::Custom`]: crate::IssueCode::Custom
#[derive(Clone)]
pub struct UnionSchema {
    candidates: Vec<Arc<dyn ValueSchema>>,
    message: String,
}

impl UnionSchema {
    /// # Errors
    ///
    /// Returns `SchemaBuildError::EmptyCandidates` if `candidates` is empty.
    pub fn new(
        candidates: Vec<Arc<dyn ValueSchema>>,
        message: impl Into<String>,
    ) -> Result<Self, SchemaBuildError> {
        if candidates.is_empty() {
            return Err(SchemaBuildError::EmptyCandidates {
                combinator: "union",
            });
        }
        Ok(Self {
            candidates,
            message: message.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false: construction rejects empty candidate lists.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl SchemaLike for UnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        let mut first_success = None;

        for (index, schema) in self.candidates.iter().enumerate() {
            if let Validation::Success(v) = schema.validate_value(value, path) {
                if first_success.is_none() {
                    trace!(candidate = index, path = %path, "union candidate accepted value");
                    first_success = Some(v);
                }
            }
        }

        match first_success {
            Some(v) => Validation::Success(v),
            None => {
                debug!(
                    candidates = self.candidates.len(),
                    path = %path,
                    "no union candidate accepted value"
                );
                Validation::Failure(Issues::single(Issue::new(path.clone(), self.message.clone())))
            }
        }
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        SchemaLike::validate(self, value, path)
    }
}

/// Delegates to the first candidate whose predicate matches.
///
/// Predicates run in order and stop at the first match; later predicates and
/// schemas are never invoked. The matched schema's result is returned
/// unchanged, so nested issues keep their full paths. When no predicate
/// matches, the result is one custom issue with the fallback message at the
/// combinator's own path.
#[derive(Clone)]
pub struct ConditionalUnionSchema {
    candidates: Vec<ConditionalCandidate>,
    message: String,
}

impl ConditionalUnionSchema {
    /// # Errors
    ///
    /// Returns `SchemaBuildError::EmptyCandidates` if `candidates` is empty.
    pub fn new(
        candidates: Vec<ConditionalCandidate>,
        message: impl Into<String>,
    ) -> Result<Self, SchemaBuildError> {
        if candidates.is_empty() {
            return Err(SchemaBuildError::EmptyCandidates {
                combinator: "conditional union",
            });
        }
        Ok(Self {
            candidates,
            message: message.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false: construction rejects empty candidate lists.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl SchemaLike for ConditionalUnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        let matched = self
            .candidates
            .iter()
            .enumerate()
            .find(|(_, c)| c.matches(value));

        match matched {
            Some((index, c)) => {
                trace!(candidate = index, path = %path, "conditional union predicate matched");
                c.schema.validate_value(value, path)
            }
            None => {
                debug!(
                    candidates = self.candidates.len(),
                    path = %path,
                    "no conditional union predicate matched"
                );
                Validation::Failure(Issues::single(Issue::new(path.clone(), self.message.clone())))
            }
        }
    }

    fn validate_to_value(&self, value: &Value, path: &IssuePath) -> Validation<Value, Issues> {
        SchemaLike::validate(self, value, path)
    }
}
